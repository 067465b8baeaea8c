//! Glow demo application
//!
//! Drives the light engine through a short headless scene: a ring of orbiting
//! lamps, a wall that hides part of them, and two draw calls per frame, one on
//! the native point-light path and one on the simulated path.
//!
//! Usage: `glow_demo [config.toml|config.ron]`

use light_engine::prelude::*;
use light_engine::render::depth::hardware_depth;
use light_engine::render::DEPTH_FAR;

const FRAME_COUNT: u32 = 8;
const LAMP_COUNT: usize = 9;
const ORBIT_RADIUS: f32 = 250.0;

struct GlowDemoApp {
    context: LightContext,
    store: LightInfoStore,
    lamps: Vec<LightInfoKey>,
    handles: Vec<LightNodeHandle>,
    camera: ViewProjection,
    depth: SoftwareDepthBuffer,
    light_sets: FrameArena<LightSet>,
    display_list: DisplayList,
}

impl GlowDemoApp {
    fn new(config: &LightingConfig) -> Self {
        let viewport = config.viewport;
        let aspect = viewport.width as f32 / viewport.height as f32;
        let view = Mat4::look_at(Vec3::new(0.0, 150.0, -500.0), Vec3::zeros(), Vec3::y());
        let projection = Mat4::perspective(1.0, aspect, 10.0, f32::from(config.fog.far));

        Self {
            context: LightContext::new(config),
            store: LightInfoStore::with_key(),
            lamps: Vec::new(),
            handles: Vec::new(),
            camera: ViewProjection::from_camera(&view, &projection),
            depth: SoftwareDepthBuffer::new(viewport.width, viewport.height),
            light_sets: FrameArena::with_capacity(2),
            display_list: DisplayList::new(),
        }
    }

    fn initialize(&mut self) {
        let sun = self.store.insert(LightInfo::directional([0, -127, 0], [120, 110, 100]));
        self.register(sun);

        for i in 0..LAMP_COUNT {
            let color = match i % 3 {
                0 => [255, 80, 40],
                1 => [80, 255, 120],
                _ => [100, 140, 255],
            };
            let lamp = if i % 2 == 0 {
                LightInfo::point_glow([0, 0, 0], color, 300)
            } else {
                LightInfo::point_plain([0, 0, 0], color, 200)
            };
            let key = self.store.insert(lamp);
            self.lamps.push(key);
            self.register(key);
        }

        log::info!(
            "Registered {} lights ({} of {} registry slots)",
            LAMP_COUNT + 1,
            self.context.registry().len(),
            self.context.registry().capacity()
        );
    }

    fn register(&mut self, key: LightInfoKey) {
        match self.context.insert_light(key) {
            Some(handle) => self.handles.push(handle),
            None => log::warn!("Light registry full, light will not be drawn"),
        }
    }

    fn update(&mut self, frame: u32) -> Result<(), LightError> {
        let phase = frame as f32 * 0.4;
        for (i, &key) in self.lamps.iter().enumerate() {
            let Some(lamp) = self.store.get_mut(key) else {
                continue;
            };
            let angle = phase + i as f32 * std::f32::consts::TAU / LAMP_COUNT as f32;
            let position = [
                (angle.cos() * ORBIT_RADIUS) as i16,
                40,
                (angle.sin() * ORBIT_RADIUS) as i16,
            ];
            lamp.set_point_position(position)?;
        }

        // Retire the oldest lamp halfway through
        if frame == FRAME_COUNT / 2 {
            if let Some(&handle) = self.handles.get(1) {
                self.context.remove_light(handle);
                log::info!("Frame {}: removed a lamp, {} lights left", frame, self.context.registry().len());
            }
        }
        Ok(())
    }

    /// Stand-in for opaque geometry: a wall over the left third of the screen
    fn rasterize_scene(&mut self) {
        self.depth.clear(DEPTH_FAR);
        let wall_depth = hardware_depth(0.5);
        let wall_width = self.depth.width() as i32 / 3;
        for y in 0..self.depth.height() as i32 {
            for x in 0..wall_width {
                self.depth.write_depth(x, y, wall_depth);
            }
        }
    }

    fn render(&mut self, frame: u32) {
        self.light_sets.reset();
        self.display_list.clear();
        self.rasterize_scene();

        // Ship hull, native point lights
        let hull = self.context.new_lights_in(&mut self.light_sets);
        hull.set_point_lights_enabled(true);
        let strategy = BindStrategy::select(hull, None);
        let hull_stats = self.context.bind_all(hull, &self.store, strategy, &self.camera);
        hull.submit(&mut self.display_list);

        // Terrain patch lit from its own origin
        let terrain = self.context.new_lights_in(&mut self.light_sets);
        let strategy = BindStrategy::select(terrain, Some(Vec3::new(0.0, 0.0, 100.0)));
        let terrain_stats = self.context.bind_all(terrain, &self.store, strategy, &self.camera);
        terrain.submit(&mut self.display_list);

        let visible = self.context.glow_check(&mut self.store, &self.camera, &self.depth);
        let glows = self.context.draw_glow(&self.store, &mut self.display_list);

        log::info!(
            "Frame {}: hull {:?}, terrain {:?}, {} glows visible, {} drawn, {} commands",
            frame,
            hull_stats,
            terrain_stats,
            visible,
            glows,
            self.display_list.commands(RenderPasses::OPAQUE).len()
                + self.display_list.commands(RenderPasses::TRANSLUCENT).len()
        );
    }

    fn run(&mut self) -> Result<(), LightError> {
        self.initialize();
        for frame in 0..FRAME_COUNT {
            self.update(frame)?;
            self.render(frame);
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        self.context.destroy_list();
        log::info!("Scene torn down, {} lights registered", self.context.registry().len());
    }
}

fn load_config() -> Result<LightingConfig, ConfigError> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading lighting config from {}", path);
            LightingConfig::load_from_file(&path)?
        }
        None => LightingConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    light_engine::foundation::logging::init();

    log::info!("Starting glow demo");

    let config = load_config()?;
    let mut app = GlowDemoApp::new(&config);

    let result = app.run();
    app.shutdown();

    match result {
        Ok(()) => {
            log::info!("Glow demo finished");
            Ok(())
        }
        Err(e) => {
            log::error!("Glow demo failed: {}", e);
            Err(e.into())
        }
    }
}
