//! Marketing landing page.

use axum::response::Html;
use chrono::{Datelike, Utc};

use super::shell::{escape, html_shell, site_header};
use crate::guidance::UserType;

/// Greeting shown by the demo chatbot section.
pub const DEMO_GREETING: &str =
    "Hi there! I'm the CareerWise AI assistant. How can I help with your career questions today?";

const STEPS: [(&str, &str); 4] = [
    (
        "Tell us about yourself",
        "Share your background, interests and goals in a short onboarding flow.",
    ),
    (
        "Chat with CareerWise AI",
        "Ask anything about careers, skills, resumes or interviews and get tailored answers.",
    ),
    (
        "Get an action plan",
        "Every answer ends with concrete steps you can take this week.",
    ),
    (
        "Track your progress",
        "Follow goals, learning paths and interview practice from your dashboard.",
    ),
];

const FEATURES: [(&str, &str); 6] = [
    (
        "Personalized Guidance",
        "Advice adapted to students, graduates, professionals and founders.",
    ),
    (
        "Resume Builder",
        "ATS-friendly resumes with suggestions that highlight measurable impact.",
    ),
    (
        "Career Assessments",
        "Discover your strengths, interests and work preferences.",
    ),
    (
        "Interview Practice",
        "Practice common questions with tips and structured sample answers.",
    ),
    (
        "Learning Paths",
        "Curated modules that close the gap between your skills and your goals.",
    ),
    (
        "Goal Tracking",
        "Set career goals, break them into milestones and watch them move.",
    ),
];

const TESTIMONIALS: [(&str, &str, &str); 3] = [
    (
        "CareerWise helped me pick a major I'm actually excited about, and showed me which internships to aim for.",
        "Priya S.",
        "University Student",
    ),
    (
        "The interview tips and STAR practice got me through three rounds and into my first developer role.",
        "Marcus T.",
        "Recent Graduate",
    ),
    (
        "After ten years in finance I wanted a change. The transition plan made the move to product management feel doable.",
        "Elena R.",
        "Product Manager",
    ),
];

fn user_type_blurb(user_type: UserType) -> &'static str {
    match user_type {
        UserType::Student => {
            "Explore career paths, choose the right courses and plan your education with confidence."
        }
        UserType::Graduate => {
            "Land your first role with job search strategy, resume help and interview preparation."
        }
        UserType::Professional => {
            "Plan your next move, grow into leadership or navigate a mid-career transition."
        }
        UserType::Entrepreneur => {
            "Validate ideas, shape your business model and build the team to scale."
        }
    }
}

/// `GET /`
pub async fn landing() -> Html<String> {
    Html(html_shell("Revolutionizing Career Guidance", &landing_content()))
}

fn landing_content() -> String {
    let user_types: String = UserType::ALL
        .into_iter()
        .map(|t| {
            format!(
                r#"<div class="card"><h3>{label}</h3><p>{blurb}</p><a href="/onboarding">Start as {label}</a></div>"#,
                label = escape(t.label()),
                blurb = user_type_blurb(t),
            )
        })
        .collect();

    let steps: String = STEPS
        .iter()
        .enumerate()
        .map(|(i, (title, body))| {
            format!(
                r#"<li class="step"><span class="step-number">{n}</span><h3>{title}</h3><p>{body}</p></li>"#,
                n = i + 1
            )
        })
        .collect();

    let features: String = FEATURES
        .iter()
        .map(|(title, body)| format!(r#"<div class="card"><h3>{title}</h3><p>{body}</p></div>"#))
        .collect();

    let testimonials: String = TESTIMONIALS
        .iter()
        .map(|(quote, name, role)| {
            format!(
                r#"<figure class="card testimonial"><blockquote>{}</blockquote><figcaption><strong>{name}</strong><span>{role}</span></figcaption></figure>"#,
                escape(quote)
            )
        })
        .collect();

    let year = Utc::now().year();
    let greeting = escape(DEMO_GREETING);

    format!(
        r##"{header}
<main>
    <section class="hero">
        <div class="container narrow center">
            <h1><span>Revolutionizing Career</span> <span class="accent">Guidance with AI</span></h1>
            <p class="lead">Personalized insights. Smart career decisions. <span class="block">No overwhelm.</span></p>
            <div class="actions">
                <a href="/chat" class="btn btn-primary">Try the Demo Chatbot</a>
                <a href="#how-it-works" class="btn btn-outline">Learn More</a>
            </div>
            <p class="badge">AI-powered guidance for your career journey</p>
        </div>
    </section>

    <section id="user-types" class="section">
        <div class="container">
            <h2>Guidance for Every Stage</h2>
            <div class="grid grid-4">{user_types}</div>
        </div>
    </section>

    <section id="how-it-works" class="section alt">
        <div class="container">
            <h2>How It Works</h2>
            <ol class="steps">{steps}</ol>
        </div>
    </section>

    <section id="features" class="section">
        <div class="container">
            <h2>Everything You Need to Grow</h2>
            <div class="grid grid-3">{features}</div>
        </div>
    </section>

    <section id="testimonials" class="section alt">
        <div class="container">
            <h2>What Our Users Say</h2>
            <div class="grid grid-3">{testimonials}</div>
        </div>
    </section>

    <section id="about" class="section">
        <div class="container narrow">
            <h2>About CareerWise</h2>
            <p>CareerWise AI combines large language models with proven career coaching practice. Whether you are choosing a major, hunting for your first job, planning a promotion or starting a company, you get answers tailored to where you are and a clear list of next steps.</p>
        </div>
    </section>

    <section id="demo" class="section alt">
        <div class="container narrow">
            <h2>Try Our Demo Chatbot</h2>
            <p>Experience the power of AI career guidance with our interactive demo</p>
            <div class="chat-window">
                <div class="message assistant"><div class="message-body">{greeting}</div></div>
                <form method="post" action="/chat" class="chat-form">
                    <input type="text" name="message" placeholder="Ask about career paths, skills, or job prospects..." autocomplete="off" required>
                    <button type="submit" class="btn btn-primary">Send</button>
                </form>
                <p class="muted small">This is a limited demo. For full functionality, sign up for a free account.</p>
            </div>
        </div>
    </section>
</main>
<footer class="site-footer">
    <div class="container">
        <p>&copy; {year} CareerWise AI. All rights reserved.</p>
    </div>
</footer>"##,
        header = site_header(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landing_has_all_sections() {
        let html = landing_content();
        for id in ["user-types", "how-it-works", "features", "testimonials", "about", "demo"] {
            assert!(html.contains(&format!(r#"id="{id}""#)), "missing section {id}");
        }
        assert!(html.contains("Recent Graduate"));
        assert!(html.contains(r#"action="/chat""#));
    }
}
