use super::{default_config_path, EXIT_FAILURE, EXIT_SUCCESS};
use srcvet_build::{check_review_prereqs, format_missing};
use srcvet_schema::ToolConfig;

pub fn run(config: &ToolConfig, json_output: bool) -> Result<u8, String> {
    let mut checks: Vec<Check> = Vec::new();
    let mut all_pass = true;

    // Check the full tool set; a reviewer usually wants all backends usable.
    let missing = check_review_prereqs(true, true);
    if missing.is_empty() {
        checks.push(Check::pass(
            "build_prereqs",
            "Build tool prerequisites satisfied",
        ));
    } else {
        all_pass = false;
        checks.push(Check::fail(
            "build_prereqs",
            &format!("Missing prerequisites: {}", format_missing(&missing)),
        ));
    }

    match default_config_path() {
        Some(path) if path.is_file() => match srcvet_schema::parse_config_file(&path) {
            Ok(_) => checks.push(Check::pass(
                "config",
                &format!("Config at {} parses", path.display()),
            )),
            Err(e) => {
                all_pass = false;
                checks.push(Check::fail("config", &format!("Config invalid: {e}")));
            }
        },
        _ => checks.push(Check::info(
            "config",
            "No config file (built-in defaults in use)",
        )),
    }

    checks.push(Check::info(
        "commands",
        &format!(
            "rebuild: {} | chroot: {} | scratch: {}",
            config.commands.rebuild.join(" "),
            config.commands.chroot.join(" "),
            config.commands.scratch.join(" ")
        ),
    ));

    print_results(&checks, all_pass, json_output)
}

fn print_results(checks: &[Check], all_pass: bool, json_output: bool) -> Result<u8, String> {
    if json_output {
        let json = serde_json::json!({
            "healthy": all_pass,
            "checks": checks.iter().map(|c| serde_json::json!({
                "name": c.name,
                "status": c.status,
                "message": c.message,
            })).collect::<Vec<_>>(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&json).map_err(|e| e.to_string())?
        );
    } else {
        println!("srcvet Doctor\n");
        for check in checks {
            let icon = match check.status.as_str() {
                "pass" => "✓",
                "fail" => "✗",
                "warn" => "⚠",
                _ => "ℹ",
            };
            println!("  {icon} {}", check.message);
        }
        println!();
        if all_pass {
            println!("All checks passed.");
        } else {
            println!("Some checks failed. See above for details.");
        }
    }
    Ok(if all_pass { EXIT_SUCCESS } else { EXIT_FAILURE })
}

struct Check {
    name: String,
    status: String,
    message: String,
}

impl Check {
    fn pass(name: &str, message: &str) -> Self {
        Self {
            name: name.to_owned(),
            status: "pass".to_owned(),
            message: message.to_owned(),
        }
    }

    fn fail(name: &str, message: &str) -> Self {
        Self {
            name: name.to_owned(),
            status: "fail".to_owned(),
            message: message.to_owned(),
        }
    }

    fn info(name: &str, message: &str) -> Self {
        Self {
            name: name.to_owned(),
            status: "info".to_owned(),
            message: message.to_owned(),
        }
    }
}
