//! Onboarding form.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::shell::{escape, html_shell, site_header};
use crate::AppState;
use crate::guidance::UserType;
use crate::onboarding::OnboardingStatus;
use crate::profile::{ExperienceLevel, UserProfile, UserProfileCreate};
use crate::security::DEMO_USER_ID;

/// Raw form fields. List fields are comma separated.
#[derive(Debug, Default, Deserialize)]
pub struct OnboardingForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub user_type: String,
    #[serde(default)]
    pub experience_level: String,
    #[serde(default)]
    pub industry_interests: String,
    #[serde(default)]
    pub career_goals: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub bio: String,
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl OnboardingForm {
    fn from_profile(p: &UserProfile) -> Self {
        Self {
            full_name: p.full_name.clone(),
            email: p.email.clone(),
            user_type: p.user_type.as_str().to_string(),
            experience_level: p
                .experience_level
                .map(|l| l.as_str().to_string())
                .unwrap_or_default(),
            industry_interests: p.industry_interests.join(", "),
            career_goals: p.career_goals.join(", "),
            skills: p.skills.join(", "),
            location: p.location.clone().unwrap_or_default(),
            bio: p.bio.clone().unwrap_or_default(),
        }
    }

    /// Convert to a profile payload. Unknown user types are rejected.
    fn to_create(&self) -> Result<UserProfileCreate, String> {
        let user_type = if self.user_type.trim().is_empty() {
            UserType::default()
        } else {
            self.user_type.parse().map_err(|e| format!("{e}"))?
        };

        Ok(UserProfileCreate {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            user_type,
            experience_level: ExperienceLevel::parse(&self.experience_level),
            industry_interests: split_list(&self.industry_interests),
            career_goals: split_list(&self.career_goals),
            skills: split_list(&self.skills),
            location: non_empty(&self.location),
            bio: non_empty(&self.bio),
        })
    }
}

fn form_page(form: &OnboardingForm, error: Option<&str>) -> String {
    let user_types: String = UserType::ALL
        .into_iter()
        .map(|t| {
            let selected = if form.user_type == t.as_str() { " selected" } else { "" };
            format!(
                r#"<option value="{}"{selected}>{}</option>"#,
                t.as_str(),
                t.label()
            )
        })
        .collect();

    let mut levels = String::from(r#"<option value="">Prefer not to say</option>"#);
    for level in ExperienceLevel::ALL {
        let selected = if form.experience_level == level.as_str() { " selected" } else { "" };
        levels.push_str(&format!(
            r#"<option value="{v}"{selected}>{v}</option>"#,
            v = level.as_str()
        ));
    }

    let error = error
        .map(|e| format!(r#"<p class="notice error" role="alert">{}</p>"#, escape(e)))
        .unwrap_or_default();

    let content = format!(
        r#"{header}
<main class="container narrow section">
    <h1>Let's get to know you</h1>
    <p class="muted">Your answers tailor every piece of guidance to where you are today.</p>
    {error}
    <form method="post" action="/onboarding" class="card form">
        <label>Full name <input type="text" name="full_name" value="{full_name}" required></label>
        <label>Email <input type="email" name="email" value="{email}" required></label>
        <label>I am a <select name="user_type">{user_types}</select></label>
        <label>Experience level <select name="experience_level">{levels}</select></label>
        <label>Industries you're interested in <input type="text" name="industry_interests" value="{industries}" placeholder="Technology, Healthcare"></label>
        <label>Career goals <input type="text" name="career_goals" value="{goals}" placeholder="Land a product role, Learn data science"></label>
        <label>Skills <input type="text" name="skills" value="{skills}" placeholder="Python, Public speaking"></label>
        <label>Location <input type="text" name="location" value="{location}"></label>
        <label>About you <textarea name="bio" rows="4">{bio}</textarea></label>
        <button type="submit" class="btn btn-primary">Finish onboarding</button>
    </form>
</main>"#,
        header = site_header(),
        full_name = escape(&form.full_name),
        email = escape(&form.email),
        industries = escape(&form.industry_interests),
        goals = escape(&form.career_goals),
        skills = escape(&form.skills),
        location = escape(&form.location),
        bio = escape(&form.bio),
    );

    html_shell("Onboarding", &content)
}

/// `GET /onboarding`: marks onboarding pending unless already completed.
pub async fn show(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Html<String>) {
    let jar = match OnboardingStatus::from_jar(&jar) {
        OnboardingStatus::Completed => jar,
        _ => OnboardingStatus::Pending.write_to(jar),
    };

    let form = state
        .profiles
        .get(DEMO_USER_ID)
        .map(|p| OnboardingForm::from_profile(&p))
        .unwrap_or_default();

    (jar, Html(form_page(&form, None)))
}

/// `POST /onboarding`
pub async fn submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<OnboardingForm>,
) -> Response {
    let saved = form
        .to_create()
        .and_then(|data| state.profiles.upsert(DEMO_USER_ID, data).map_err(|e| e.to_string()));

    match saved {
        Ok(profile) => {
            tracing::info!(
                name: "onboarding.completed",
                user_id = %profile.user_id,
                user_type = %profile.user_type,
                "Onboarding completed"
            );
            (OnboardingStatus::Completed.write_to(jar), Redirect::to("/dashboard")).into_response()
        }
        Err(message) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(form_page(&form, Some(&message))),
        )
            .into_response(),
    }
}
