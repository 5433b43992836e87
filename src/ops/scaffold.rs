//! Implementation of `capstan new` and `capstan init`.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::util::context::DECLARATION_FILE;

/// Options for creating a new project.
#[derive(Debug, Clone)]
pub struct NewOptions {
    /// Project name
    pub name: String,

    /// Scaffold a library target instead of an executable
    pub lib: bool,

    /// Initialize in an existing directory
    pub init: bool,
}

/// Generate a default declaration for an executable project.
pub fn generate_exe_declaration(name: &str) -> String {
    format!(
        "cmake_minimum_required(VERSION 3.24)\n\
         project({name} CXX)\n\
         set(CMAKE_CXX_STANDARD 17)\n\
         add_executable({name} main.cpp)\n"
    )
}

/// Generate a default declaration for a library project.
pub fn generate_lib_declaration(name: &str) -> String {
    format!(
        "cmake_minimum_required(VERSION 3.24)\n\
         project({name} CXX)\n\
         set(CMAKE_CXX_STANDARD 17)\n\
         add_library({name} STATIC src/{name}.cpp)\n"
    )
}

/// Create a new Capstan project.
pub fn new_project(path: &Path, opts: &NewOptions) -> Result<()> {
    if path.exists() && !opts.init {
        bail!(
            "destination `{}` already exists\n\
             \n\
             Use `capstan init` to initialize an existing directory.",
            path.display()
        );
    }

    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }

    let declaration_path = path.join(DECLARATION_FILE);
    if declaration_path.exists() {
        bail!(
            "`{}` already exists in `{}`",
            DECLARATION_FILE,
            path.display()
        );
    }

    let declaration = if opts.lib {
        generate_lib_declaration(&opts.name)
    } else {
        generate_exe_declaration(&opts.name)
    };
    fs::write(&declaration_path, &declaration)
        .with_context(|| format!("failed to write {}", DECLARATION_FILE))?;

    if opts.lib {
        let src_dir = path.join("src");
        fs::create_dir_all(&src_dir).with_context(|| "failed to create src directory")?;
        let source = format!(
            "#include <iostream>\n\
             \n\
             void {name}_init() {{\n\
             \x20   std::cout << \"{name} initialized\" << std::endl;\n\
             }}\n",
            name = opts.name
        );
        fs::write(src_dir.join(format!("{}.cpp", opts.name)), source)?;
    } else {
        let main = format!(
            "#include <iostream>\n\
             \n\
             int main() {{\n\
             \x20   std::cout << \"Hello from {}!\" << std::endl;\n\
             \x20   return 0;\n\
             }}\n",
            opts.name
        );
        fs::write(path.join("main.cpp"), main)?;
    }

    let gitignore = "# Capstan configure output\n.capstan/\n\n# Build trees\nbuild/\n";
    fs::write(path.join(".gitignore"), gitignore)?;

    Ok(())
}

/// Initialize a Capstan project in an existing directory.
pub fn init_project(path: &Path, opts: &NewOptions) -> Result<()> {
    let mut opts = opts.clone();
    opts.init = true;
    new_project(path, &opts)
}
