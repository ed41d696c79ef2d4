fn main() -> anyhow::Result<()> {
    ai_debug_playground::cli::run()
}
