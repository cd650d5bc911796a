fn main() -> anyhow::Result<()> {
    after_dark::flow::run()
}
