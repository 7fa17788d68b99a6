//! Banners printed before each external command.
//!
//! They go to stdout ahead of the tool's own output so a failure report is
//! always preceded by the build root, arch and stage it happened under.

use console::style;
use std::path::PathBuf;

use crate::config::Config;
use crate::runner::CommandSpec;
use crate::stage::Stage;
use crate::ui::icons::{BROOM, CHECK, GEAR, HAMMER};

const WIDE_RULE: usize = 66;
const NARROW_RULE: usize = 44;

fn rule(width: usize) -> String {
    "=".repeat(width)
}

pub fn print_configure_banner(config: &Config) {
    println!("{}", style(rule(WIDE_RULE)).dim());
    println!(
        "{}{}",
        GEAR,
        style("Performing a minimal PETSc (re-)configuration needed to build docs").bold()
    );
    println!("PETSC_DIR={}", config.build_root.display());
    println!("PETSC_ARCH={}", config.arch);
    println!("{}", style(rule(WIDE_RULE)).dim());
}

pub fn print_build_banner(config: &Config, stage: Stage, spec: &CommandSpec) {
    println!("{}", style(rule(NARROW_RULE)).dim());
    println!(
        "{}{} ({})",
        HAMMER,
        style("Building a subset of PETSc classic docs").bold(),
        style(stage).cyan()
    );
    println!("PETSC_DIR={}", config.build_root.display());
    println!("PETSC_ARCH={}", config.arch);
    println!("{}", style(spec.display()).dim());
    println!("{}", style(rule(NARROW_RULE)).dim());
}

pub fn print_done(stage: Stage) {
    println!("{}Classic docs {} stage complete", CHECK, style(stage).cyan());
}

pub fn print_clean_summary(removed: &[PathBuf]) {
    if removed.is_empty() {
        println!("{}Nothing to clean", BROOM);
        return;
    }
    for path in removed {
        println!("{}Removed {}", BROOM, style(path.display()).dim());
    }
}
