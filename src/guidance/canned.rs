//! Keyword-driven replies used when no model is configured.

const CAREER_WORDS: &[&str] = &["career", "job", "work", "profession"];
const TRANSITION_WORDS: &[&str] = &["change", "switch", "transition"];
const CHOICE_WORDS: &[&str] = &["should", "pursue", "choose"];
const RESUME_WORDS: &[&str] = &["resume", "cv"];
const INTERVIEW_WORDS: &[&str] = &["interview", "interviewing"];

const TRANSITION_REPLY: &str = "Great question about career transitions! Here are some key steps to consider:

🎯 **Self-Assessment**:
- Identify your transferable skills and strengths
- Clarify your values and what you want in your next role
- Assess your interests and passion areas

📊 **Research & Planning**:
- Explore new industries and roles that align with your goals
- Research salary ranges and growth potential
- Identify skill gaps and create a learning plan

🤝 **Network & Connect**:
- Reach out to professionals in your target field
- Attend industry events and online communities
- Consider informational interviews

**This Week's Action Items:**
1. Write down 3 specific roles you'd like to explore
2. Identify 5 people in those fields to connect with on LinkedIn
3. Research one online course or certification relevant to your target field

What specific aspect of career change would you like to explore further?";

const CHOICE_REPLY: &str = "Excellent question! Let me help you explore career paths that align with your strengths and interests.

🔍 **Career Exploration Strategy**:
- **Skills-Based Approach**: Look for roles that utilize your strongest abilities
- **Interest-Driven Path**: Consider fields that align with what excites you
- **Market Opportunity**: Research growing industries and emerging roles
- **Values Alignment**: Ensure the work environment matches your priorities

🚀 **Popular Growing Fields**:
- **Technology**: AI/ML, Cybersecurity, Cloud Computing, Data Science
- **Healthcare**: Telehealth, Mental Health, Healthcare Technology
- **Sustainability**: Renewable Energy, Environmental Consulting
- **Digital Marketing**: Content Creation, Social Media Strategy, SEO

🎯 **Next Steps**:
1. Take a career assessment to identify your personality type and work preferences
2. Shadow professionals in 2-3 industries that interest you
3. Research job postings to understand required skills and qualifications

**This Week's Action Items:**
1. List your top 5 skills and top 3 interests
2. Research 3 career paths that combine both
3. Schedule one informational interview

What industries or types of work have you been curious about lately?";

const RESUME_REPLY: &str = "Let's optimize your resume for maximum impact!

📝 **Resume Optimization Strategy**:

**Structure & Format**:
- Clean, ATS-friendly design with clear sections
- Professional summary highlighting your value proposition
- Reverse chronological work experience
- Skills section with relevant keywords

**Content Enhancement**:
- Use action verbs and quantify achievements (increased, reduced, managed)
- Tailor content to each job application
- Include relevant keywords from job postings
- Focus on accomplishments, not just duties

**Key Sections to Perfect**:
1. **Professional Summary**: 2-3 lines showcasing your unique value
2. **Experience**: Focus on measurable accomplishments
3. **Skills**: Mix of technical and soft skills
4. **Education/Certifications**: Include relevant training

**This Week's Action Items:**
1. Rewrite your professional summary with specific achievements
2. Add metrics to at least 3 bullet points in your experience section
3. Research and add 5 relevant keywords from target job postings

Would you like me to help with a specific section of your resume?";

const INTERVIEW_REPLY: &str = "Interview preparation is crucial for success! Here's your action plan:

🎯 **Before the Interview**:
- Research the company, role, and interviewer
- Prepare STAR method examples for common questions
- Practice your elevator pitch and key talking points
- Prepare thoughtful questions to ask the interviewer

💪 **During the Interview**:
- Arrive early and dress appropriately
- Maintain good eye contact and positive body language
- Provide specific examples with measurable results
- Ask engaging questions about the role and company

📋 **Common Questions to Prepare**:
- \"Tell me about yourself\"
- \"Why are you interested in this role?\"
- \"What's your greatest strength/weakness?\"
- \"Describe a challenge you overcame\"

**This Week's Action Items:**
1. Prepare 5 STAR method stories showcasing different skills
2. Research the company's recent news and initiatives
3. Practice your responses out loud or with a friend

What type of interview are you preparing for? I can provide more specific guidance!";

const GENERAL_REPLY: &str = "Hi there! Thanks for reaching out to CareerWise AI, your personal career guidance assistant.

I'm here to help you navigate every aspect of your professional journey:

🎯 **Career Planning**: Explore paths, set goals, and create actionable plans
📝 **Job Search Strategy**: Resume optimization, interview prep, and networking
📈 **Skill Development**: Identify growth opportunities and learning resources
💼 **Career Advancement**: Leadership development and promotion strategies
🔄 **Career Transitions**: Navigate industry changes or role switches

**Popular Questions I Help With**:
- \"What career should I pursue?\"
- \"How can I improve my resume?\"
- \"What skills should I develop next?\"
- \"How do I prepare for interviews?\"
- \"How can I negotiate my salary?\"

**This Week's Action Items**:
1. Think about what specific career challenge you'd like to tackle
2. Consider what aspect of your career you'd like to improve most
3. Ask me a specific question about your career goals

What's your most pressing career question right now? The more details you share, the more personalized guidance I can provide!";

/// Topic detected from the wording of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    /// Changing careers or industries.
    Transition,
    /// Picking a career path.
    Choice,
    /// Resume or CV help.
    Resume,
    /// Interview preparation.
    Interview,
    /// Anything else.
    General,
}

fn mentions(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

/// Classify a message by keyword. Matching is substring-based and case-insensitive.
pub fn classify(message: &str) -> Topic {
    let lower = message.to_lowercase();

    if mentions(&lower, CAREER_WORDS) {
        if mentions(&lower, TRANSITION_WORDS) {
            return Topic::Transition;
        }
        if mentions(&lower, CHOICE_WORDS) {
            return Topic::Choice;
        }
    }

    if mentions(&lower, RESUME_WORDS) {
        Topic::Resume
    } else if mentions(&lower, INTERVIEW_WORDS) {
        Topic::Interview
    } else {
        Topic::General
    }
}

/// Canned reply for a message.
pub fn reply(message: &str) -> &'static str {
    match classify(message) {
        Topic::Transition => TRANSITION_REPLY,
        Topic::Choice => CHOICE_REPLY,
        Topic::Resume => RESUME_REPLY,
        Topic::Interview => INTERVIEW_REPLY,
        Topic::General => GENERAL_REPLY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_transition() {
        assert_eq!(
            classify("I want to SWITCH my career to design"),
            Topic::Transition
        );
    }

    #[test]
    fn test_classify_choice() {
        assert_eq!(classify("What career should I pursue?"), Topic::Choice);
    }

    #[test]
    fn test_classify_resume_and_interview() {
        assert_eq!(classify("How do I improve my resume?"), Topic::Resume);
        assert_eq!(classify("Interview preparation tips"), Topic::Interview);
    }

    #[test]
    fn test_career_without_subtopic_falls_through() {
        // "job" alone is not enough to pick a career reply; the CV keyword wins.
        assert_eq!(classify("job hunting, is my cv ok?"), Topic::Resume);
        assert_eq!(classify("I like my job"), Topic::General);
    }

    #[test]
    fn test_reply_is_never_empty() {
        for msg in ["", "hello", "career change", "resume"] {
            assert!(!reply(msg).is_empty());
        }
    }
}
