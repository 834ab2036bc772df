use super::{json_pretty, resolve_checklist, EXIT_SUCCESS};
use console::Style;
use srcvet_schema::parse_checklist_file;
use std::path::Path;

pub fn run(checklist: Option<&Path>, json: bool) -> Result<u8, String> {
    let path = resolve_checklist(checklist)?;
    let checklist = parse_checklist_file(&path).map_err(|e| e.to_string())?;

    if json {
        println!("{}", json_pretty(&checklist)?);
        return Ok(EXIT_SUCCESS);
    }

    println!("checklist: {}", path.display());
    println!();
    let heading = Style::new().bold();
    println!(
        "{} ({} items)",
        heading.apply_to("MUST"),
        checklist.must.len()
    );
    for item in &checklist.must {
        println!("  - {}", item.text);
    }
    println!();
    println!(
        "{} ({} items)",
        heading.apply_to("SHOULD"),
        checklist.should.len()
    );
    for item in &checklist.should {
        println!("  - {}", item.text);
    }

    Ok(EXIT_SUCCESS)
}
