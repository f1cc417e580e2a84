use tracing::info;
use tracing_subscriber::EnvFilter;

use multilevel::animals;
use multilevel::construct::Hierarchy;
use multilevel::error::Result;
use multilevel::settings::Settings;

fn main() -> Result<()> {
    let settings = Settings::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_filter.clone())),
        )
        .init();
    info!(version = %settings.version, "multilevel sample starting");

    let hierarchy = Hierarchy::new();
    let animal = animals::define_animal(&hierarchy)?;
    let tom = animals::create_tom(&hierarchy, &animal)?;
    let jerry = animals::create_jerry(&hierarchy, &animal)?;
    info!(%tom, %jerry, clabjects = hierarchy.len(), "sample hierarchy built");
    for prop in tom.properties() {
        let state = tom.property(prop.name())?;
        info!(property = %prop, state = %state, "tom");
    }
    Ok(())
}
