fn main() -> anyhow::Result<()> {
    wpars_cli::run()
}
