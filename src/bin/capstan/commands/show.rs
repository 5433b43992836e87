//! `capstan show` command

use anyhow::Result;

use crate::cli::{ShowArgs, ShowFormat};
use crate::commands::resolve_declaration;
use capstan::ops::load_declaration;
use capstan::Declaration;

pub fn execute(args: ShowArgs) -> Result<()> {
    let path = resolve_declaration(args.path)?;
    let declaration = load_declaration(&path)?;

    match args.format {
        ShowFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&declaration)?);
        }
        ShowFormat::Human => print_human(&declaration),
    }
    Ok(())
}

fn print_human(declaration: &Declaration) {
    if let Some(floor) = &declaration.schema_floor {
        println!("schema floor: {}", floor);
    }

    if let Some(project) = &declaration.project {
        let languages = project
            .languages
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        print!("project: {} [{}]", project.name, languages);
        if let Some(std) = project.cxx_std {
            print!(" {}", std);
        }
        println!();
    }

    if !declaration.dependencies.is_empty() {
        println!("dependencies:");
        for dep in &declaration.dependencies {
            println!("├── {}", dep);
        }
    }

    for target in &declaration.targets {
        println!("target: {} ({})", target.name, target.kind);
        for source in &target.sources {
            println!("├── source {}", source);
        }
        for link in &target.links {
            println!("├── links {}", link);
        }
    }
}
