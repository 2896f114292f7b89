use stadium_viewer::{
    Result,
    abs::App,
    config::ViewerConfig,
    logging,
    render::GlBackend,
    scene::{Camera, ObjectAssets, Scene},
    viewer::Viewer,
};

fn main() {
    if let Err(err) = logging::init() {
        eprintln!("{err}");
        std::process::exit(1);
    }

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = ViewerConfig::from_env()?;
    log::info!(
        "Scene revision {} ({} objects)",
        config.revision,
        config.objects.len()
    );

    let mut app = App::new(&config.window)?;

    let assets = ObjectAssets::load_all(&config)?;
    let mut backend = GlBackend::new(&app.gl, config.clear_color())?;
    let scene = Scene::upload(&mut backend, &assets)?;
    drop(assets);

    let size = match app.drawable_size() {
        (0, _) | (_, 0) => (config.window.width, config.window.height),
        size => size,
    };
    let mut viewer = Viewer::new(
        backend,
        scene,
        Camera::from(&config.camera),
        config.rotation_speed,
        size,
    );
    viewer.run(&mut app);

    Ok(())
}
