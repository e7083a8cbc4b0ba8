//! Markdown rendering of a tailored resume

use crate::engine::tailor::TailoredResume;

/// Render the tailored resume into a single Markdown body.
///
/// Section order is fixed: Education, Work Experience, Projects, Skills.
/// Empty sections still render their heading.
pub fn render_markdown(resume: &TailoredResume) -> String {
    let mut md = String::new();
    let info = &resume.personal_info;

    md.push_str(&format!("# {}\n\n", info.name));
    md.push_str(&format!(
        "**Email:** {} | **Phone:** {} | **LinkedIn:** {} | **GitHub:** {}\n\n",
        info.email, info.phone, info.linkedin, info.github
    ));

    md.push_str("## Education\n");
    for edu in &resume.education {
        md.push_str(&format!("- **{}** in {}\n", edu.degree, edu.major));
        md.push_str(&format!(
            "  - {}, {} ({} - {})\n",
            edu.institution, edu.location, edu.start_date, edu.end_date
        ));
        if let Some(gpa) = &edu.gpa {
            md.push_str(&format!("  - GPA: {}\n", gpa));
        }
        if let Some(honors) = &edu.honors {
            md.push_str(&format!("  - Honors: {}\n", honors));
        }
    }
    md.push('\n');

    md.push_str("## Work Experience\n");
    for exp in &resume.work_experience {
        md.push_str(&format!("### {} at {}\n", exp.title, exp.company));
        md.push_str(&format!(
            "**{}** | {} - {}\n",
            exp.location,
            exp.start_date,
            exp.end_date.as_deref().unwrap_or("Present")
        ));
        for line in &exp.description {
            md.push_str(&format!("- {}\n", line));
        }
        if !exp.technologies.is_empty() {
            md.push_str(&format!(
                "- **Technologies:** {}\n",
                exp.technologies.join(", ")
            ));
        }
        md.push('\n');
    }

    md.push_str("## Projects\n");
    for proj in &resume.projects {
        md.push_str(&format!("### {}\n", proj.name));
        md.push_str(&format!(
            "**{}** - {}\n",
            proj.start_date,
            proj.end_date.as_deref().unwrap_or("Present")
        ));
        for line in &proj.description {
            md.push_str(&format!("- {}\n", line));
        }
        if !proj.technologies.is_empty() {
            md.push_str(&format!(
                "- **Technologies:** {}\n",
                proj.technologies.join(", ")
            ));
        }
        if let Some(link) = &proj.link {
            md.push_str(&format!("- **Link:** {}\n", link));
        }
        md.push('\n');
    }

    md.push_str("## Skills\n");
    for (category, skills_list) in &resume.skills {
        if !skills_list.is_empty() {
            md.push_str(&format!("**{}:** {}\n", category, skills_list.join(", ")));
        }
    }
    md.push('\n');

    md
}
