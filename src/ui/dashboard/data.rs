//! Fixed dashboard content.

use chrono::NaiveDate;

pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
}

pub const NAVIGATION: [NavItem; 7] = [
    NavItem { name: "Dashboard", href: "/dashboard" },
    NavItem { name: "Resume Builder", href: "/dashboard/resume" },
    NavItem { name: "Assessments", href: "/dashboard/assessments" },
    NavItem { name: "Interview Prep", href: "/dashboard/interview" },
    NavItem { name: "Learning Paths", href: "/dashboard/learning" },
    NavItem { name: "Career Goals", href: "/dashboard/goals" },
    NavItem { name: "Analytics", href: "/dashboard/analytics" },
];

pub const BOTTOM_NAVIGATION: [NavItem; 2] = [
    NavItem { name: "Profile", href: "/dashboard/profile" },
    NavItem { name: "Settings", href: "/dashboard/settings" },
];

pub struct Stat {
    pub name: &'static str,
    pub value: &'static str,
    pub change: &'static str,
}

pub const STATS: [Stat; 4] = [
    Stat { name: "Resumes Created", value: "3", change: "+2 this month" },
    Stat { name: "Assessments Completed", value: "2", change: "+1 this week" },
    Stat { name: "Interview Sessions", value: "5", change: "+3 this week" },
    Stat { name: "Learning Progress", value: "67%", change: "+12% this month" },
];

/// (action, when)
pub const RECENT_ACTIVITY: [(&str, &str); 4] = [
    ("Completed Personality Assessment", "2 hours ago"),
    ("Updated Software Engineer Resume", "1 day ago"),
    ("Practiced Behavioral Interview", "2 days ago"),
    ("Started React Learning Path", "3 days ago"),
];

pub struct QuickAction {
    pub title: &'static str,
    pub description: &'static str,
    pub href: &'static str,
}

pub const QUICK_ACTIONS: [QuickAction; 4] = [
    QuickAction {
        title: "Create New Resume",
        description: "Build a professional resume with our AI-powered builder",
        href: "/dashboard/resume",
    },
    QuickAction {
        title: "Take Assessment",
        description: "Discover your strengths and career preferences",
        href: "/dashboard/assessments",
    },
    QuickAction {
        title: "Practice Interview",
        description: "Improve your interview skills with AI feedback",
        href: "/dashboard/interview",
    },
    QuickAction {
        title: "Explore Careers",
        description: "Find career paths that match your profile",
        href: "/dashboard/goals",
    },
];

pub struct LearningPath {
    pub title: &'static str,
    pub progress: u8,
    pub total_modules: u32,
    pub completed_modules: u32,
    pub next_lesson: &'static str,
}

pub const LEARNING_PATHS: [LearningPath; 2] = [
    LearningPath {
        title: "Full-Stack Web Development",
        progress: 67,
        total_modules: 12,
        completed_modules: 8,
        next_lesson: "Advanced React Patterns",
    },
    LearningPath {
        title: "UX/UI Design Fundamentals",
        progress: 21,
        total_modules: 14,
        completed_modules: 3,
        next_lesson: "User Research Methods",
    },
];

pub struct Goal {
    pub title: &'static str,
    pub progress: u8,
    /// `YYYY-MM-DD`
    pub due_date: &'static str,
    pub priority: &'static str,
    pub category: &'static str,
    pub milestones: u32,
    pub completed_milestones: u32,
}

pub const GOALS: [Goal; 3] = [
    Goal {
        title: "Become a Senior Software Engineer",
        progress: 65,
        due_date: "2024-12-31",
        priority: "High",
        category: "Career",
        milestones: 5,
        completed_milestones: 3,
    },
    Goal {
        title: "Master Data Science",
        progress: 40,
        due_date: "2025-06-30",
        priority: "High",
        category: "Skill",
        milestones: 5,
        completed_milestones: 2,
    },
    Goal {
        title: "Build Professional Network",
        progress: 55,
        due_date: "2024-12-31",
        priority: "Medium",
        category: "Network",
        milestones: 4,
        completed_milestones: 2,
    },
];

/// (label, percent)
pub const CAREER_PROGRESS: [(&str, u8); 3] = [
    ("Profile Completion", 85),
    ("Skill Development", 67),
    ("Interview Readiness", 72),
];

pub struct Assessment {
    pub title: &'static str,
    pub description: &'static str,
    pub minutes: u32,
    pub completed: bool,
}

pub const ASSESSMENTS: [Assessment; 4] = [
    Assessment {
        title: "Personality Assessment",
        description: "Understand how you work, communicate and make decisions.",
        minutes: 15,
        completed: true,
    },
    Assessment {
        title: "Career Interest Inventory",
        description: "Match your interests to fields and roles you will enjoy.",
        minutes: 20,
        completed: true,
    },
    Assessment {
        title: "Technical Skills Assessment",
        description: "Benchmark your technical skills against your target roles.",
        minutes: 30,
        completed: false,
    },
    Assessment {
        title: "Work Values Survey",
        description: "Find out what matters most to you in a workplace.",
        minutes: 10,
        completed: false,
    },
];

/// (title, last updated, ATS score)
pub const RESUMES: [(&str, &str, u8); 3] = [
    ("Software Engineer Resume", "1 day ago", 86),
    ("Frontend Developer Resume", "2 weeks ago", 74),
    ("General Resume", "1 month ago", 61),
];

pub struct InterviewQuestion {
    pub question: &'static str,
    pub category: &'static str,
    pub difficulty: &'static str,
    pub tips: [&'static str; 4],
    pub sample_answer: Option<&'static str>,
}

pub const INTERVIEW_QUESTIONS: [InterviewQuestion; 5] = [
    InterviewQuestion {
        question: "Tell me about yourself.",
        category: "behavioral",
        difficulty: "easy",
        tips: [
            "Keep it professional and relevant to the role",
            "Structure your answer: Present, Past, Future",
            "Highlight key achievements and skills",
            "Keep it under 2 minutes",
        ],
        sample_answer: Some(
            "I'm a software engineer with 3 years of experience building web applications...",
        ),
    },
    InterviewQuestion {
        question: "Describe a challenging project you worked on and how you overcame obstacles.",
        category: "behavioral",
        difficulty: "medium",
        tips: [
            "Use the STAR method (Situation, Task, Action, Result)",
            "Choose a relevant example that shows problem-solving",
            "Focus on your specific contributions",
            "Quantify the results when possible",
        ],
        sample_answer: None,
    },
    InterviewQuestion {
        question: "How do you handle working under pressure?",
        category: "behavioral",
        difficulty: "medium",
        tips: [
            "Provide specific examples",
            "Show your coping strategies",
            "Demonstrate positive outcomes",
            "Mention time management skills",
        ],
        sample_answer: None,
    },
    InterviewQuestion {
        question: "Explain the difference between REST and GraphQL APIs.",
        category: "technical",
        difficulty: "medium",
        tips: [
            "Define both concepts clearly",
            "Compare their strengths and weaknesses",
            "Provide use case examples",
            "Show practical understanding",
        ],
        sample_answer: None,
    },
    InterviewQuestion {
        question: "Where do you see yourself in 5 years?",
        category: "behavioral",
        difficulty: "easy",
        tips: [
            "Show ambition but be realistic",
            "Align with the company's growth opportunities",
            "Focus on skill development",
            "Avoid mentioning other companies",
        ],
        sample_answer: None,
    },
];

pub struct PracticeStats {
    pub total_sessions: u32,
    pub average_score: u8,
    pub improvement_rate: u8,
    pub strong_areas: [&'static str; 2],
    pub improvement_areas: [&'static str; 2],
}

pub const PRACTICE_STATS: PracticeStats = PracticeStats {
    total_sessions: 12,
    average_score: 78,
    improvement_rate: 15,
    strong_areas: ["Technical Knowledge", "Communication"],
    improvement_areas: ["Confidence", "Storytelling"],
};

/// Days from `today` until `due` (negative once past). `None` for a
/// malformed date.
pub fn days_until(due: &str, today: NaiveDate) -> Option<i64> {
    NaiveDate::parse_from_str(due, "%Y-%m-%d")
        .ok()
        .map(|d| (d - today).num_days())
}

/// Human label for a due date.
pub fn due_label(days: i64) -> String {
    match days {
        d if d < 0 => format!("Overdue by {} days", -d),
        0 => "Due today".to_string(),
        1..=30 => format!("Due soon: {days} days left"),
        d => format!("{d} days left"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_until() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        assert_eq!(days_until("2024-12-31", today), Some(30));
        assert_eq!(days_until("2024-11-30", today), Some(-1));
        assert_eq!(days_until("not a date", today), None);
    }

    #[test]
    fn test_due_label() {
        assert_eq!(due_label(-3), "Overdue by 3 days");
        assert_eq!(due_label(0), "Due today");
        assert_eq!(due_label(7), "Due soon: 7 days left");
        assert_eq!(due_label(90), "90 days left");
    }

    #[test]
    fn test_learning_paths_are_consistent() {
        for path in &LEARNING_PATHS {
            assert!(path.completed_modules <= path.total_modules);
        }
    }
}
