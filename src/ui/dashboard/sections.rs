use chrono::NaiveDate;

use super::data::{
    ASSESSMENTS, CAREER_PROGRESS, GOALS, INTERVIEW_QUESTIONS, LEARNING_PATHS, PRACTICE_STATS,
    RESUMES, STATS, days_until, due_label,
};
use crate::onboarding::OnboardingStatus;
use crate::profile::UserProfile;
use crate::ui::shell::{escape, progress_bar};

pub fn resume() -> String {
    let rows: String = RESUMES
        .iter()
        .map(|(title, updated, score)| {
            format!(
                r#"<tr><td>{title}</td><td>{updated}</td><td>{score}/100</td></tr>"#
            )
        })
        .collect();

    format!(
        r#"<section class="card">
    <h2>Your Resumes</h2>
    <table class="table">
        <thead><tr><th>Resume</th><th>Last updated</th><th>ATS score</th></tr></thead>
        <tbody>{rows}</tbody>
    </table>
</section>
<section class="card">
    <h2>Improve with AI</h2>
    <p>Ask CareerWise AI to review a section of your resume and suggest stronger, measurable bullet points.</p>
    <form method="post" action="/chat">
        <input type="hidden" name="message" value="How do I improve my resume?">
        <button type="submit" class="btn btn-primary">Get resume tips</button>
    </form>
</section>"#
    )
}

pub fn assessments() -> String {
    let cards: String = ASSESSMENTS
        .iter()
        .map(|a| {
            let status = if a.completed {
                r#"<span class="pill done">Completed</span>"#
            } else {
                r#"<span class="pill">Not started</span>"#
            };
            format!(
                r#"<div class="card">{status}<h3>{}</h3><p>{}</p><p class="muted small">About {} minutes</p></div>"#,
                a.title, a.description, a.minutes
            )
        })
        .collect();
    format!(r#"<section class="grid grid-2">{cards}</section>"#)
}

/// Question bank, or one question in practice mode when `question` is a
/// valid 1-based index.
pub fn interview(question: Option<&str>) -> String {
    let stats = format!(
        r#"<section class="grid grid-4">
    <div class="card stat"><p class="stat-value">{}</p><p class="stat-name">Practice Sessions</p></div>
    <div class="card stat"><p class="stat-value">{}%</p><p class="stat-name">Average Score</p></div>
    <div class="card stat"><p class="stat-value">+{}%</p><p class="stat-name">Improvement</p></div>
    <div class="card stat"><p class="stat-value">{}</p><p class="stat-name">Strong Areas</p><p class="muted small">Work on: {}</p></div>
</section>"#,
        PRACTICE_STATS.total_sessions,
        PRACTICE_STATS.average_score,
        PRACTICE_STATS.improvement_rate,
        PRACTICE_STATS.strong_areas.join(", "),
        PRACTICE_STATS.improvement_areas.join(", "),
    );

    let selected = question
        .and_then(|q| q.trim().parse::<usize>().ok())
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| INTERVIEW_QUESTIONS.get(i));

    let practice = match (question, selected) {
        (_, Some(q)) => {
            let tips: String = q.tips.iter().map(|t| format!("<li>{t}</li>")).collect();
            let sample = q
                .sample_answer
                .map(|s| format!("<h4>Sample Answer Structure:</h4><p>{}</p>", escape(s)))
                .unwrap_or_default();
            let ask = escape(&format!(
                "Help me answer this interview question: {}",
                q.question
            ));
            format!(
                r#"<section class="card practice">
    <h4>Question:</h4>
    <p class="question">{}</p>
    <p class="muted small">{} &middot; {}</p>
    <h4>Tips for answering:</h4>
    <ul>{tips}</ul>
    {sample}
    <form method="post" action="/chat">
        <input type="hidden" name="message" value="{ask}">
        <button type="submit" class="btn btn-primary">Practice with CareerWise AI</button>
    </form>
</section>"#,
                escape(q.question),
                q.category,
                q.difficulty
            )
        }
        (Some(raw), None) => format!(
            r#"<p class="notice">No question {}. Pick one from the list below.</p>"#,
            escape(raw)
        ),
        (None, None) => r#"<section class="card"><h3>Ready to Practice?</h3><p>Pick a question below to see tips and practice your answer.</p></section>"#.to_string(),
    };

    let list: String = INTERVIEW_QUESTIONS
        .iter()
        .enumerate()
        .map(|(i, q)| {
            format!(
                r#"<li><a href="/dashboard/interview?question={n}">{}</a> <span class="pill">{}</span> <span class="pill">{}</span></li>"#,
                escape(q.question),
                q.category,
                q.difficulty,
                n = i + 1
            )
        })
        .collect();

    format!(
        r#"{stats}
{practice}
<section class="card">
    <h2>Question Bank</h2>
    <ol class="questions">{list}</ol>
</section>"#
    )
}

pub fn learning() -> String {
    let cards: String = LEARNING_PATHS
        .iter()
        .map(|p| {
            format!(
                r#"<div class="card"><h3>{}</h3>{}<p>{}% complete &middot; {} of {} modules</p><p class="muted small">Next lesson: {}</p></div>"#,
                p.title,
                progress_bar(p.progress),
                p.progress,
                p.completed_modules,
                p.total_modules,
                p.next_lesson
            )
        })
        .collect();
    format!(r#"<section class="grid grid-2">{cards}</section>"#)
}

pub fn goals(today: NaiveDate) -> String {
    let cards: String = GOALS
        .iter()
        .map(|g| {
            let due = days_until(g.due_date, today).map(due_label).unwrap_or_default();
            format!(
                r#"<div class="card goal"><span class="pill priority-{}">{} priority</span><h3>{}</h3>{}<p>{} of {} milestones</p><p class="muted small">{} &middot; due {} &middot; {due}</p></div>"#,
                g.priority.to_lowercase(),
                g.priority,
                g.title,
                progress_bar(g.progress),
                g.completed_milestones,
                g.milestones,
                g.category,
                g.due_date
            )
        })
        .collect();
    format!(r#"<section class="grid grid-3">{cards}</section>"#)
}

pub fn analytics() -> String {
    let stats: String = STATS
        .iter()
        .map(|s| format!(r#"<tr><td>{}</td><td>{}</td><td>{}</td></tr>"#, s.name, s.value, s.change))
        .collect();
    let progress: String = CAREER_PROGRESS
        .iter()
        .map(|(label, pct)| format!(r#"<div class="metric"><span>{label}</span><span>{pct}%</span>{}</div>"#, progress_bar(*pct)))
        .collect();

    format!(
        r#"<section class="card">
    <h2>Activity</h2>
    <table class="table"><thead><tr><th>Metric</th><th>Value</th><th>Change</th></tr></thead><tbody>{stats}</tbody></table>
</section>
<section class="card">
    <h2>Career Progress</h2>
    {progress}
</section>"#
    )
}

fn list_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "&mdash;".to_string()
    } else {
        escape(&items.join(", "))
    }
}

pub fn profile(profile: Option<&UserProfile>) -> String {
    let Some(p) = profile else {
        return r#"<section class="card"><h2>No profile yet</h2><p>Complete onboarding to personalize your guidance.</p><a href="/onboarding" class="btn btn-primary">Start onboarding</a></section>"#.to_string();
    };

    let opt = |v: Option<&str>| v.map_or_else(|| "&mdash;".to_string(), escape);

    format!(
        r#"<section class="card">
    <h2>{name}</h2>
    <dl class="details">
        <dt>Email</dt><dd>{email}</dd>
        <dt>I am a</dt><dd>{user_type}</dd>
        <dt>Experience</dt><dd>{experience}</dd>
        <dt>Location</dt><dd>{location}</dd>
        <dt>Industries</dt><dd>{industries}</dd>
        <dt>Career goals</dt><dd>{goals}</dd>
        <dt>Skills</dt><dd>{skills}</dd>
        <dt>About</dt><dd>{bio}</dd>
    </dl>
    <a href="/onboarding" class="btn btn-outline">Edit profile</a>
</section>"#,
        name = escape(&p.full_name),
        email = escape(&p.email),
        user_type = p.user_type.label(),
        experience = opt(p.experience_level.map(|l| l.as_str())),
        location = opt(p.location.as_deref()),
        industries = list_or_dash(&p.industry_interests),
        goals = list_or_dash(&p.career_goals),
        skills = list_or_dash(&p.skills),
        bio = opt(p.bio.as_deref()),
    )
}

pub fn settings(status: OnboardingStatus) -> String {
    let label = match status {
        OnboardingStatus::NotRequired => "Not required",
        OnboardingStatus::Pending => "Pending",
        OnboardingStatus::Completed => "Completed",
    };
    format!(
        r#"<section class="card">
    <h2>Account</h2>
    <dl class="details"><dt>Onboarding</dt><dd>{label}</dd></dl>
    <a href="/onboarding" class="btn btn-outline">Redo onboarding</a>
</section>"#
    )
}
