use anyhow::Result;

fn main() -> Result<()> {
    regress_cli::main_entry()
}
