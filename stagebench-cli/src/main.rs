fn main() -> anyhow::Result<()> {
    stagebench_cli::run()
}
