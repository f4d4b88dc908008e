mod cli;
mod core;
mod report;
mod simd;
#[cfg(test)]
mod test_log;

fn main() -> anyhow::Result<()> {
    cli::run::entry()
}
