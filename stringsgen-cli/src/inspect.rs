use serde_json::json;
use stringsgen::{EnumBuilder, Member, StringsFile};

/// Everything `inspect` reports about one file.
#[derive(Debug, Clone)]
pub struct InspectReport {
    pub input: String,
    pub members: Vec<Member>,
    pub duplicates: Vec<String>,
    pub skipped: Vec<stringsgen::SkippedRecord>,
}

pub fn inspect_file(input: &str) -> Result<InspectReport, String> {
    let file =
        StringsFile::read_from(input).map_err(|e| format!("Error reading {}: {}", input, e))?;
    let mut builder = EnumBuilder::new();
    builder.add_entries(file.entries);

    Ok(InspectReport {
        input: input.to_string(),
        members: builder.members(),
        duplicates: builder.duplicates().iter().map(ToString::to_string).collect(),
        skipped: file.skipped,
    })
}

fn describe_parameters(member: &Member) -> String {
    if member.placeholders.is_empty() {
        "none".to_string()
    } else {
        member
            .placeholders
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Print the members of a `.strings` file, as text or JSON.
pub fn run_inspect_command(input: &str, json_output: bool) -> Result<(), String> {
    let report = inspect_file(input)?;

    if json_output {
        let body = json!({
            "input": report.input,
            "members": report.members,
            "duplicates": report.duplicates,
            "skipped": report.skipped,
        });
        let text = serde_json::to_string_pretty(&body)
            .map_err(|e| format!("Error serializing to JSON: {}", e))?;
        println!("{}", text);
        return Ok(());
    }

    println!("=== {} ===", report.input);
    println!("Members: {}", report.members.len());
    for (i, member) in report.members.iter().enumerate() {
        println!("\n  {}. {}", i + 1, member.name);
        println!("     Key: {}", member.key);
        println!("     Parameters: {}", describe_parameters(member));
    }

    if !report.duplicates.is_empty() {
        println!("\nDropped duplicates:");
        for duplicate in &report.duplicates {
            println!("  - {}", duplicate);
        }
    }

    if !report.skipped.is_empty() {
        println!("\nSkipped records:");
        for record in &report.skipped {
            println!("  line {}: {}", record.line, record.text);
        }
    }
    Ok(())
}
