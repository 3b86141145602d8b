//! Dashboard shell and pages.
//!
//! Every page shares a sidebar with the active item highlighted. Users whose
//! onboarding is [`OnboardingStatus::Pending`] are sent to `/onboarding`.

pub mod data;
mod sections;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use serde::Deserialize;

use super::shell::{escape, html_shell, progress_bar};
use crate::AppState;
use crate::onboarding::OnboardingStatus;
use crate::security::DEMO_USER_ID;
use data::{
    BOTTOM_NAVIGATION, CAREER_PROGRESS, GOALS, LEARNING_PATHS, NAVIGATION, QUICK_ACTIONS,
    RECENT_ACTIVITY, STATS, days_until, due_label,
};

#[derive(Debug, Default, Deserialize)]
pub struct SectionQuery {
    /// 1-based interview question to practice.
    #[serde(default)]
    pub question: Option<String>,
}

fn nav_links(items: &[data::NavItem], active: &str) -> String {
    items
        .iter()
        .map(|item| {
            let (class, current) = if item.href == active {
                ("nav-link active", r#" aria-current="page""#)
            } else {
                ("nav-link", "")
            };
            format!(
                r#"<a href="{}" class="{class}"{current}>{}</a>"#,
                item.href, item.name
            )
        })
        .collect()
}

/// Wrap `content` in the dashboard layout.
pub fn dashboard_shell(active: &str, title: &str, display_name: &str, content: &str) -> String {
    let body = format!(
        r#"<div class="dashboard">
    <aside class="sidebar">
        <a href="/" class="brand"><span class="brand-mark">CW</span> CareerWise</a>
        <nav class="sidebar-nav">{nav}</nav>
        <nav class="sidebar-nav bottom">{bottom}</nav>
        <div class="sidebar-user">{user}</div>
    </aside>
    <div class="dashboard-main">
        <header class="topbar">
            <h1>{heading}</h1>
            <a href="/chat" class="btn btn-primary">Chat with CareerWise AI</a>
        </header>
        <main class="dashboard-content">{content}</main>
    </div>
</div>"#,
        nav = nav_links(&NAVIGATION, active),
        bottom = nav_links(&BOTTOM_NAVIGATION, active),
        user = escape(display_name),
        heading = escape(title),
    );
    html_shell(title, &body)
}

fn overview_content(first_name: &str) -> String {
    let stats: String = STATS
        .iter()
        .map(|s| {
            format!(
                r#"<div class="card stat"><p class="stat-value">{}</p><p class="stat-change">{}</p><p class="stat-name">{}</p></div>"#,
                s.value, s.change, s.name
            )
        })
        .collect();

    let paths: String = LEARNING_PATHS
        .iter()
        .map(|p| {
            format!(
                r#"<div class="card"><h3>{}</h3><p>{} of {} modules</p>{}<p class="muted small">Next: {}</p></div>"#,
                p.title,
                p.completed_modules,
                p.total_modules,
                progress_bar(p.progress),
                p.next_lesson
            )
        })
        .collect();

    let today = Utc::now().date_naive();
    let goals: String = GOALS
        .iter()
        .map(|g| {
            let due = days_until(g.due_date, today).map(due_label).unwrap_or_default();
            format!(
                r#"<div class="card goal"><span class="pill priority-{prio}">{}</span><h3>{}</h3>{}<p class="muted small">{} &middot; {due}</p></div>"#,
                g.priority,
                g.title,
                progress_bar(g.progress),
                g.category,
                prio = g.priority.to_lowercase(),
            )
        })
        .collect();

    let actions: String = QUICK_ACTIONS
        .iter()
        .map(|a| {
            format!(
                r#"<a href="{}" class="card action"><h3>{}</h3><p>{}</p></a>"#,
                a.href, a.title, a.description
            )
        })
        .collect();

    let activity: String = RECENT_ACTIVITY
        .iter()
        .map(|(action, time)| format!(r#"<li><strong>{action}</strong> <span class="muted">{time}</span></li>"#))
        .collect();

    let progress: String = CAREER_PROGRESS
        .iter()
        .map(|(label, pct)| format!(r#"<div class="metric"><span>{label}</span><span>{pct}%</span>{}</div>"#, progress_bar(*pct)))
        .collect();

    format!(
        r#"<section class="welcome card">
    <h2>Welcome back, {name}!</h2>
    <p>Ready to advance your career today?</p>
</section>
<section class="grid grid-4">{stats}</section>
<section>
    <h2>Continue Learning</h2>
    <p class="muted">Pick up where you left off</p>
    <div class="grid grid-2">{paths}</div>
</section>
<section>
    <h2>Active Goals</h2>
    <p class="muted">Track your career objectives</p>
    <div class="grid grid-3">{goals}</div>
</section>
<section>
    <h2>Quick Actions</h2>
    <p class="muted">Jump into your career development journey</p>
    <div class="grid grid-4">{actions}</div>
</section>
<section class="grid grid-2">
    <div class="card">
        <h2>Recent Activity</h2>
        <ul class="activity">{activity}</ul>
    </div>
    <div class="card">
        <h2>Career Progress</h2>
        {progress}
    </div>
</section>"#,
        name = escape(first_name),
    )
}

/// First name of the demo user's profile, if any.
fn first_name(state: &AppState) -> String {
    state
        .profiles
        .get(DEMO_USER_ID)
        .and_then(|p| p.full_name.split_whitespace().next().map(ToString::to_string))
        .unwrap_or_else(|| "there".to_string())
}

fn needs_onboarding(jar: &CookieJar) -> bool {
    OnboardingStatus::from_jar(jar) == OnboardingStatus::Pending
}

/// `GET /dashboard`
pub async fn overview(State(state): State<AppState>, jar: CookieJar) -> Response {
    if needs_onboarding(&jar) {
        return Redirect::to("/onboarding").into_response();
    }
    let name = first_name(&state);
    Html(dashboard_shell(
        "/dashboard",
        "Dashboard",
        &name,
        &overview_content(&name),
    ))
    .into_response()
}

/// `GET /dashboard/{section}`
pub async fn section(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(section): Path<String>,
    Query(query): Query<SectionQuery>,
) -> Response {
    if needs_onboarding(&jar) {
        return Redirect::to("/onboarding").into_response();
    }

    let profile = state.profiles.get(DEMO_USER_ID);
    let status = OnboardingStatus::from_jar(&jar);

    let page = match section.as_str() {
        "resume" => Some(("Resume Builder", sections::resume())),
        "assessments" => Some(("Assessments", sections::assessments())),
        "interview" => Some((
            "Interview Prep",
            sections::interview(query.question.as_deref()),
        )),
        "learning" => Some(("Learning Paths", sections::learning())),
        "goals" => Some(("Career Goals", sections::goals(Utc::now().date_naive()))),
        "analytics" => Some(("Analytics", sections::analytics())),
        "profile" => Some(("Profile", sections::profile(profile.as_ref()))),
        "settings" => Some(("Settings", sections::settings(status))),
        _ => None,
    };

    match page {
        Some((title, content)) => {
            let active = format!("/dashboard/{section}");
            Html(dashboard_shell(&active, title, &first_name(&state), &content)).into_response()
        }
        None => (StatusCode::NOT_FOUND, Html(super::not_found_page())).into_response(),
    }
}
