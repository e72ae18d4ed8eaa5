use absolution_fx_core::chat::{
    Author, CannedProvider, Confessional, InMemoryMessageStore, MemoryKeyValueStore, UserIdentity,
};
use absolution_fx_core::scene::{AbsolveTransition, BURN_CAPTION, CONFIRM_PROMPT};
use absolution_fx_core::{DisplaySurface, FireEffectScene, FireOverlay, ParticleKind, SceneConfig};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Headless burn effect demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "absolution-fx-demo")]
#[command(about = "Runs the fire, smoke and ember effect without a window", long_about = None)]
struct Args {
    /// Surface width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Surface height in pixels
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Animation length in seconds
    #[arg(short, long, default_value_t = 5.0)]
    duration: f32,

    /// Frames per second
    #[arg(short, long, default_value_t = 60)]
    fps: u32,

    /// Pin the particle seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Pixel margin around breakpoints before the tier switches
    #[arg(long, default_value_t = 0)]
    hysteresis: u32,

    /// Resize to this width halfway through the run
    #[arg(long)]
    resize_to: Option<u32>,

    /// Bake all frames in parallel and compare against sequential ticks
    #[arg(short, long)]
    bake: bool,

    /// Report interval in seconds
    #[arg(short, long, default_value_t = 1.0)]
    report_interval: f32,

    /// Play the confession, absolve and clear sequence instead
    #[arg(short, long)]
    absolve: bool,
}

/// Surface that only counts presented frames.
struct HeadlessSurface {
    width: u32,
    height: u32,
    presented: usize,
}

impl DisplaySurface for HeadlessSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn present(&mut self, _scene: &FireEffectScene) {
        self.presented += 1;
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = SceneConfig {
        seed: args.seed,
        hysteresis_px: args.hysteresis,
        ..SceneConfig::default()
    };

    if args.absolve {
        run_absolve(&args, config);
        return;
    }

    println!("=== Absolution FX Demo ===\n");

    let mut scene = match FireEffectScene::mount(config, args.width, args.height) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("Failed to mount scene: {e}");
            std::process::exit(1);
        }
    };

    let profile = scene.profile();
    println!(
        "Surface {}x{} ({:?}, zoom {}), {} flames, {} smoke, {} embers\n",
        profile.width,
        profile.height,
        profile.tier,
        profile.zoom,
        scene.field(ParticleKind::Fire).len(),
        scene.field(ParticleKind::Smoke).len(),
        scene.field(ParticleKind::Ember).len(),
    );

    let frame_count = (args.duration * args.fps as f32).ceil() as usize;
    let times: Vec<f32> = (0..frame_count).map(|i| i as f32 / args.fps as f32).collect();

    if args.bake {
        run_bake(&mut scene, &times);
        return;
    }

    let report_every = ((args.report_interval * args.fps as f32).round() as usize).max(1);
    let started = Instant::now();

    for (frame, &t) in times.iter().enumerate() {
        if let Some(width) = args.resize_to {
            if frame == frame_count / 2 {
                match scene.resize(width, args.height) {
                    Ok(change) => println!(
                        "Resized to {}x{}: tier {:?}{}",
                        width,
                        args.height,
                        change.profile.tier,
                        if change.tier_changed { " (reseeded)" } else { "" }
                    ),
                    Err(e) => eprintln!("Resize rejected: {e}"),
                }
            }
        }

        scene.tick(t);

        if frame % report_every == 0 {
            let frame_state = scene.frame();
            println!(
                "t={:5.2}s  fire {:.3}  smoke {:.3}  embers {:.3}  light {:.2}",
                t,
                frame_state.fire.opacity,
                frame_state.smoke.opacity,
                frame_state.embers.opacity,
                frame_state.light.intensity,
            );
        }
    }

    let elapsed = started.elapsed();
    println!(
        "\n{} frames in {:.2?} ({:.1} us/frame)",
        frame_count,
        elapsed,
        elapsed.as_secs_f64() * 1e6 / frame_count.max(1) as f64
    );
}

fn run_bake(scene: &mut FireEffectScene, times: &[f32]) {
    let started = Instant::now();
    let baked = scene.bake(times);
    let bake_time = started.elapsed();

    let started = Instant::now();
    let mut mismatches = 0;
    for (frame, &t) in baked.iter().zip(times) {
        scene.tick(t);
        if *frame != scene.frame() {
            mismatches += 1;
        }
    }
    let tick_time = started.elapsed();

    println!("Baked {} frames in {:.2?}", baked.len(), bake_time);
    println!("Sequential ticks took {:.2?}", tick_time);
    println!("Mismatched frames: {mismatches}");
}

fn run_absolve(args: &Args, config: SceneConfig) {
    let mut surface = HeadlessSurface {
        width: args.width,
        height: args.height,
        presented: 0,
    };
    let mut storage = MemoryKeyValueStore::new();
    let mut rng = identity_rng(args.seed);
    let mut identity = UserIdentity::load(&mut storage, &mut rng);
    let owner = Some(identity.user_id.clone());

    let mut chat = Confessional::new(
        InMemoryMessageStore::new(),
        CannedProvider::new(["Your sins are forgiven, my child. Go in peace."]),
    );
    chat.greet(&mut identity, &mut storage);
    chat.send("I got a tattoo", Author::Penitent, owner.clone());
    chat.run_pending_replies();

    for message in chat.messages(owner.as_ref()) {
        println!("{}: {}", message.author.name(), message.body);
    }

    let mut overlay = FireOverlay::new(config);
    let mut absolve = AbsolveTransition::default();
    absolve.request();
    println!("\n{CONFIRM_PROMPT}");

    let step = Duration::from_secs(1) / args.fps.max(1);
    let mut now = Duration::ZERO;
    if let Err(e) = absolve.confirm(now, &mut overlay, &surface) {
        eprintln!("Failed to start the burn: {e}");
        std::process::exit(1);
    }
    println!("{BURN_CAPTION}");

    loop {
        now += step;
        overlay.on_frame(now.as_secs_f32(), &mut surface);
        if absolve.update(now, &mut overlay).is_some() {
            let removed = chat.clear(owner.as_ref());
            info!("Cleared {} messages after {:.2?}", removed, now);
            break;
        }
    }

    println!(
        "\nPresented {} frames, {} messages remain",
        surface.presented,
        chat.messages(owner.as_ref()).len()
    );
}

fn identity_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}
