use anyhow::Result;
use std::io::Write;

use console_input::{Console, LineBuffer};

fn main() -> Result<()> {
    console_input::stdout_panic_hook();

    println!("=== Profile ===\n");

    let mut console = Console::stdio();
    let mut name = LineBuffer::<50>::new();
    console.read_into("Enter your name: ", &mut name);
    let age = console.read_long("Enter your age: ");
    let height = console.read_float("Enter your height (cm): ");
    let grade = console.read_char("Enter your grade (A-F): ");

    {
        let mut out = std::io::stdout().lock();
        writeln!(out, "\n=== Your Information ===")?;
        writeln!(out, "Name: {}", name)?;
        writeln!(out, "Age: {} years", age)?;
        writeln!(out, "Height: {:.1} cm", height)?;
        writeln!(out, "Grade: {}", grade)?;
        writeln!(out, "\nPress enter to continue...")?;
        out.flush()?;
    }

    console.read_string("", 0);
    Ok(())
}
