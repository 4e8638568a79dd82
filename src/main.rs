use stillframe::app::{self, ViewerConfig};

fn main() -> anyhow::Result<()> {
    app::run(ViewerConfig::default())
}
