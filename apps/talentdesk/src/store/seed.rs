//! Mock records the dashboard starts with.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{
    Candidate, Job, JobStatus, Priority, Qualification, ResumeRecord, Stage, StatusColor,
};

/// Initial store contents, injected into `RecordStore::new`.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub jobs: Vec<Job>,
    pub candidates: Vec<Candidate>,
    pub resumes: HashMap<String, ResumeRecord>,
}

impl SeedData {
    /// The fixed mock data set. Every seeded job is posted at `now`.
    pub fn mock(now: DateTime<Utc>) -> Self {
        SeedData {
            jobs: mock_jobs(now),
            candidates: mock_candidates(),
            resumes: mock_resumes(),
        }
    }
}

fn quals(items: &[(&str, bool)]) -> Vec<Qualification> {
    items
        .iter()
        .map(|(text, mandatory)| Qualification {
            text: text.to_string(),
            mandatory: *mandatory,
        })
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

#[allow(clippy::too_many_arguments)]
fn active_job(
    id: &str,
    title: &str,
    location: &str,
    work_type: &str,
    experience: (&str, &str),
    employment: &str,
    budget: &str,
    description: &str,
    posted_at: DateTime<Utc>,
) -> Job {
    Job {
        id: id.to_string(),
        title: title.to_string(),
        location: location.to_string(),
        work_type: work_type.to_string(),
        status: JobStatus::Active,
        candidate_count: 0,
        experience: experience.0.to_string(),
        experience_required: experience.1.to_string(),
        employment: employment.to_string(),
        budget: budget.to_string(),
        budget_range: Some(budget.to_string()),
        industry: "Technology".to_string(),
        posted_date: "0 day ago".to_string(),
        posted_at,
        description: description.to_string(),
        qualifications: Vec::new(),
        skills: Vec::new(),
        recruiter_notes: String::new(),
        total_candidates: 0,
        shortlisted: 0,
        in_screening: 0,
        offers_sent: 0,
        last_updated: String::new(),
        priority: None,
        expected_joining: None,
        hiring_manager: None,
        project: None,
    }
}

fn mock_jobs(now: DateTime<Utc>) -> Vec<Job> {
    let test_engineer = Job {
        qualifications: quals(&[
            ("Bachelor's degree in Computer Science or related field", true),
            ("Experience with testing frameworks", false),
        ]),
        skills: strings(&["Manual Testing", "Automation Testing", "API Testing"]),
        last_updated: "2 hours ago".to_string(),
        priority: Some(Priority::High),
        expected_joining: date(2024, 2, 15),
        hiring_manager: Some("John Doe".to_string()),
        project: Some("AI Platform".to_string()),
        ..active_job(
            "1",
            "Test Engineer",
            "Pune",
            "Hybrid",
            ("0-2 years", "2+ years of testing experience"),
            "Full-time",
            "₹4-6 LPA",
            "Seeking a skilled Test Engineer for comprehensive testing solutions.",
            now,
        )
    };

    let intern = Job {
        candidate_count: 2,
        qualifications: quals(&[
            ("Bachelor's degree in Computer Science, Software Engineering, or related field", true),
            ("Knowledge of software testing methodologies and best practices", true),
            ("Experience with defect tracking tools", true),
            ("Familiarity with automated testing frameworks", true),
        ]),
        skills: strings(&[
            "Manual and automated test case development",
            "Defect identification and documentation",
            "Functional testing",
            "Regression testing",
            "Performance testing",
            "Collaboration with developers",
            "Test plan creation and maintenance",
            "Testing documentation",
        ]),
        recruiter_notes: "No recruiter notes available.".to_string(),
        total_candidates: 2,
        shortlisted: 1,
        in_screening: 1,
        last_updated: "1 hour ago".to_string(),
        priority: Some(Priority::High),
        expected_joining: date(2024, 1, 30),
        hiring_manager: Some("Jane Smith".to_string()),
        project: Some("AI Platform".to_string()),
        ..active_job(
            "2",
            "Intern Software Developer",
            "Pune",
            "Pune/Hybrid",
            ("0-1 years", "Fresh graduates or 0-1 year experience"),
            "Internship",
            "₹15-25k per month",
            "Seeking a passionate Junior Software Developer for Java backend development, React front-end, and SQL database management for AI Agentic applications. Will work on scalable web applications, ensuring user experience and efficient data management.",
            now,
        )
    };

    let gen_ai = Job {
        qualifications: quals(&[
            ("Master's degree in AI/ML or related field", true),
            ("Experience with LLMs and generative models", true),
        ]),
        skills: strings(&["Python", "TensorFlow", "PyTorch", "NLP", "Machine Learning"]),
        last_updated: "3 hours ago".to_string(),
        priority: Some(Priority::Medium),
        expected_joining: date(2024, 3, 1),
        hiring_manager: Some("Mike Johnson".to_string()),
        project: Some("AI Platform".to_string()),
        ..active_job(
            "3",
            "Generative AI Engineer",
            "Pune",
            "Pune",
            ("1 year", "1-3 years in AI/ML"),
            "Full-time",
            "₹8-12 LPA",
            "Looking for an AI Engineer specialized in generative AI technologies.",
            now,
        )
    };

    let developer = Job {
        qualifications: quals(&[
            ("Bachelor's degree in Computer Science", true),
            ("1-3 years of development experience", false),
        ]),
        skills: strings(&["JavaScript", "React", "Node.js", "Python", "SQL"]),
        last_updated: "4 hours ago".to_string(),
        priority: Some(Priority::Medium),
        expected_joining: date(2024, 2, 20),
        hiring_manager: Some("Sarah Wilson".to_string()),
        project: Some("E-commerce App".to_string()),
        ..active_job(
            "4",
            "Software Developer",
            "Mumbai",
            "Pune/Hybrid",
            ("1 year", "1-3 years of development experience"),
            "Full-time",
            "₹6-10 LPA",
            "Full-stack software developer position.",
            now,
        )
    };

    let frontend = Job {
        qualifications: quals(&[
            ("5+ years of frontend development experience", true),
            ("Expert in React and modern JavaScript", true),
        ]),
        skills: strings(&["React", "TypeScript", "CSS", "HTML", "JavaScript"]),
        last_updated: "5 hours ago".to_string(),
        priority: Some(Priority::Low),
        expected_joining: date(2024, 3, 15),
        hiring_manager: Some("Alex Brown".to_string()),
        project: Some("Mobile Banking".to_string()),
        ..active_job(
            "5",
            "Sr Front End Developer",
            "Pune",
            "Pune, Maharashtra",
            ("5 years", "5+ years of frontend development experience"),
            "Full-time",
            "₹12-18 LPA",
            "Senior frontend developer with React expertise.",
            now,
        )
    };

    vec![test_engineer, intern, gen_ai, developer, frontend]
}

fn candidate(
    id: &str,
    name: &str,
    stage: Stage,
    status: (&str, StatusColor),
    skills: &[&str],
    fitment: (u8, &str),
    photo: &str,
) -> Candidate {
    Candidate {
        id: id.to_string(),
        name: name.to_string(),
        job_id: "2".to_string(),
        stage,
        status: status.0.to_string(),
        status_color: status.1,
        skills: strings(skills),
        fitment_score: fitment.0,
        fitment_summary: fitment.1.to_string(),
        profile_image: format!(
            "https://images.pexels.com/photos/{photo}/pexels-photo-{photo}.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&fit=crop"
        ),
    }
}

fn mock_candidates() -> Vec<Candidate> {
    vec![
        candidate(
            "1",
            "Janhavi Sharma",
            Stage::Fitment,
            ("High Potential", StatusColor::Green),
            &["Java", "React", "SQL"],
            (80, "Strong technical skills in Java and React, perfect match for internship role"),
            "774909",
        ),
        candidate(
            "3",
            "Priya Patel",
            Stage::Fitment,
            ("High Potential", StatusColor::Green),
            &["Python", "Django", "HTML", "CSS"],
            (72, "Good backend skills with Python, needs frontend experience with React"),
            "1239291",
        ),
        candidate(
            "4",
            "Rahul Singh",
            Stage::Fitment,
            ("Needs Evaluation", StatusColor::Yellow),
            &["JavaScript", "Node.js", "MongoDB"],
            (68, "Strong in JavaScript and backend, lacks SQL database experience"),
            "1222271",
        ),
        candidate(
            "5",
            "Anita Desai",
            Stage::Fitment,
            ("Needs Evaluation", StatusColor::Yellow),
            &["React", "JavaScript", "CSS", "HTML"],
            (63, "Excellent frontend skills, needs backend development experience"),
            "1181686",
        ),
        candidate(
            "6",
            "Vikram Kumar",
            Stage::Fitment,
            ("Low Potential", StatusColor::Red),
            &["Java", "Spring Boot", "MySQL"],
            (58, "Strong backend foundation, needs modern frontend framework experience"),
            "1043471",
        ),
        candidate(
            "2",
            "Aarya Ranpise",
            Stage::Technical,
            ("Technical Assessment", StatusColor::Green),
            &["Python", "JavaScript", "Node.js"],
            (85, "Excellent technical skills demonstrated in assessment, strong problem-solving abilities"),
            "1239291",
        ),
    ]
}

const STUDENT_SUMMARY: &str =
    "Computer Science student with experience in web development and programming.";

struct ResumeSeed<'a> {
    name: &'a str,
    email: &'a str,
    contact: &'a str,
    linkedin: &'a str,
    github: &'a str,
    education: &'a str,
    summary: &'a str,
    experience: [&'a str; 2],
    skills: &'a [&'a str],
    projects: [&'a str; 2],
    achievements: [&'a str; 2],
}

impl ResumeSeed<'_> {
    fn build(self) -> ResumeRecord {
        ResumeRecord {
            name: self.name.to_string(),
            email: self.email.to_string(),
            contact: self.contact.to_string(),
            linkedin: self.linkedin.to_string(),
            github: self.github.to_string(),
            education: self.education.to_string(),
            summary: self.summary.to_string(),
            experience: strings(&self.experience),
            skills: strings(self.skills),
            projects: strings(&self.projects),
            achievements: strings(&self.achievements),
            ..Default::default()
        }
    }
}

fn mock_resumes() -> HashMap<String, ResumeRecord> {
    let seeds = [
        (
            "1",
            ResumeSeed {
                name: "Janhavi Sharma",
                email: "janhavi.sharma@email.com",
                contact: "+91 9876543210",
                linkedin: "linkedin.com/in/janhavisharma",
                github: "",
                education: "Bachelor of Computer Science, Pune University (2021-2025)",
                summary: STUDENT_SUMMARY,
                experience: [
                    "Developed a Blood Bank Management System using Java and MySQL",
                    "Created responsive web interfaces using HTML, CSS, and JavaScript",
                ],
                skills: &["Java", "React", "SQL"],
                projects: [
                    "Blood Bank Management System - Java application with database integration",
                    "E-commerce Website - Frontend development with responsive design",
                ],
                achievements: [
                    "Dean's List for 2 consecutive semesters",
                    "Winner of College Technical Fest 2023",
                ],
            },
        ),
        (
            "2",
            ResumeSeed {
                name: "Aarya Ranpise",
                email: "aarya123r@email.com",
                contact: "+91 9856543211",
                linkedin: "linkedin.com/in/ranpiseaarya",
                github: "github.com/aarya",
                education: "Bachelor of Technology, MIT WPU (2021-2025)",
                summary: STUDENT_SUMMARY,
                experience: [
                    "Built web applications using Python and Django framework",
                    "Created responsive web interfaces using HTML, CSS, and JavaScript",
                ],
                skills: &["Python", "Django", "HTML", "CSS"],
                projects: [
                    "Library Management System - Python Django application",
                    "Personal Portfolio Website - Frontend development with responsive design",
                ],
                achievements: [
                    "Certificate of Merit in Academics for 2 years",
                    "IBM - Java certification course",
                ],
            },
        ),
        (
            "3",
            ResumeSeed {
                name: "Priya Patel",
                email: "priya.patel@email.com",
                contact: "+91 9876543211",
                linkedin: "linkedin.com/in/priyapatel",
                github: "github.com/priyapatel",
                education: "Bachelor of Information Technology, Mumbai University (2021-2025)",
                summary: STUDENT_SUMMARY,
                experience: [
                    "Built web applications using Python and Django framework",
                    "Created responsive web interfaces using HTML, CSS, and JavaScript",
                ],
                skills: &["Python", "Django", "HTML", "CSS"],
                projects: [
                    "Library Management System - Python Django application",
                    "Personal Portfolio Website - Frontend development with responsive design",
                ],
                achievements: [
                    "Certificate of Honour in Academics for 2 years",
                    "IBM - Python certification course",
                ],
            },
        ),
        (
            "4",
            ResumeSeed {
                name: "Rahul Singh",
                email: "rahul.singh@email.com",
                contact: "+91 9876543212",
                linkedin: "linkedin.com/in/rahulsingh",
                github: "",
                education: "Bachelor of Computer Applications, Delhi University (2021-2025)",
                summary: STUDENT_SUMMARY,
                experience: [
                    "Developed REST APIs using Node.js and Express",
                    "Created responsive web interfaces using HTML, CSS, and JavaScript",
                ],
                skills: &["JavaScript", "Node.js", "MongoDB"],
                projects: [
                    "Chat Application - Real-time messaging using Node.js and Socket.io",
                    "E-commerce Website - Full-stack development with responsive design",
                ],
                achievements: [
                    "Best Project Award in Web Development course",
                    "Merit at Academic Program - NIT Goa 2024",
                ],
            },
        ),
        (
            "5",
            ResumeSeed {
                name: "Anita Desai",
                email: "anita.desai@gmail.com",
                contact: "+91 9876543213",
                linkedin: "linkedin.com/in/anitadesai",
                github: "github.com/anitadesai",
                education: "Bachelor of Computer Science, Bangalore University (2021-2025)",
                summary: STUDENT_SUMMARY,
                experience: [
                    "Built interactive user interfaces using React and JavaScript",
                    "Created responsive web designs using HTML, CSS, and modern frameworks",
                ],
                skills: &["React", "JavaScript", "CSS", "HTML"],
                projects: [
                    "Weather App - React application with API integration",
                    "Portfolio Website - Frontend development with modern design",
                ],
                achievements: [
                    "Outstanding Student in Frontend Development",
                    "Udemy - React certification course",
                ],
            },
        ),
        (
            "6",
            ResumeSeed {
                name: "Vikram Kumar",
                email: "vikram12345@gmail.com",
                contact: "+91 9876543212",
                linkedin: "linkedin.com/in/vikramks",
                github: "",
                education: "Bachelor of Computer Applications, Delhi University (2022-2026)",
                summary: "Computer Science student with experience in web development and software development.",
                experience: [
                    "Developed REST APIs using Node.js and Express",
                    "Created responsive web interfaces using HTML, CSS, and JavaScript",
                ],
                skills: &["JavaScript", "Node.js", "MongoDB"],
                projects: [
                    "Chat Application - Real-time messaging using Node.js and Socket.io",
                    "E-commerce Website - Full-stack development with responsive design",
                ],
                achievements: [
                    "Best Project Award in Web Development Hackwithme - 2024",
                    "Coursera - JavaScript certification",
                ],
            },
        ),
    ];

    seeds
        .into_iter()
        .map(|(id, seed)| (id.to_string(), seed.build()))
        .collect()
}
