//! Viewer application: world, player and the per-frame loop.

use std::time::Duration;

use raycraft_app::{AppContext, DeviceEvent, DeviceId, FrameContext, VoxelApp, WindowEvent};
use raycraft_core::constants::TICK;
use raycraft_input::{Action, CursorMode, InputState, DEFAULT_SENSITIVITY};
use raycraft_physics::{
    break_block, place_block, BlockTarget, FixedTimestep, Hotbar, MovementConfig, Player,
};
use raycraft_render::{
    save_framebuffer, Camera, Lighting, RenderConfig, Raytracer, ScreenDetail, ScreenshotConfig,
    TextureAtlas, TextureStyle, WorldVolume,
};
use raycraft_voxel::{GridDims, VoxelGrid};
use raycraft_world::{generate_world, generate_world_with_seed};
use tracing::{debug, error, info};

use crate::options::ViewerOptions;

pub const TITLE: &str = "Raycraft";

/// Output pattern for F2 captures when none was given.
const DEFAULT_SHOT_PATTERN: &str = "screenshot_{}.png";

/// Viewer application state.
pub struct Viewer {
    grid: VoxelGrid,
    player: Player,
    movement: MovementConfig,
    timestep: FixedTimestep,
    hotbar: Hotbar,
    /// Block under the crosshair after this frame's movement
    target: Option<BlockTarget>,
    input: InputState,
    volume: WorldVolume,
    atlas: TextureAtlas,
    raytracer: Raytracer,
    detail: ScreenDetail,
    screenshot_config: ScreenshotConfig,
    /// F2 was pressed; save the next rendered frame
    capture_requested: bool,
    should_exit: bool,
}

impl VoxelApp for Viewer {
    fn init(ctx: &mut AppContext) -> anyhow::Result<Self> {
        let args: Vec<String> = std::env::args().collect();
        let options = ViewerOptions::parse(&args);

        let mut screenshot_config = ScreenshotConfig::parse_args(&args);
        if screenshot_config.enabled {
            info!(
                "Screenshot capture enabled: {:?} frames, output pattern: {}",
                screenshot_config.frames, screenshot_config.output_pattern
            );
        }
        if screenshot_config.output_pattern.is_empty() {
            screenshot_config.output_pattern = DEFAULT_SHOT_PATTERN.to_string();
        }

        let dims = GridDims::default_for_build();
        let mut grid = VoxelGrid::new(dims)?;
        let seed = match options.seed {
            Some(seed) => generate_world_with_seed(&mut grid, seed).seed,
            None => generate_world(&mut grid),
        };
        info!("World seed: {seed}");

        let player = Player::spawn(dims);
        let atlas = TextureAtlas::generate(TextureStyle::for_build());
        let raytracer = Raytracer::new(RenderConfig::default().with_shadows(options.shadows));
        info!(
            "Render config: detail={}, shadows={}",
            options.detail.level(),
            options.shadows
        );

        // Start with cursor captured for mouse look
        let mut input = InputState::new();
        input.set_cursor_mode(CursorMode::Locked);
        ctx.apply_cursor_mode(input.cursor_mode());

        let viewer = Self {
            volume: WorldVolume::from_grid(&grid),
            grid,
            player,
            movement: MovementConfig::default(),
            timestep: FixedTimestep::new(TICK),
            hotbar: Hotbar::default(),
            target: None,
            input,
            atlas,
            raytracer,
            detail: options.detail,
            screenshot_config,
            capture_requested: false,
            should_exit: false,
        };
        ctx.set_title(&viewer.title());

        info!("Viewer initialized");
        Ok(viewer)
    }

    fn update(&mut self, ctx: &AppContext, dt: f32) {
        if self.input.is_action_just_pressed(Action::ToggleCursor) {
            let mode = self.input.cursor_mode().toggled();
            self.input.set_cursor_mode(mode);
            ctx.apply_cursor_mode(mode);
        }

        if self.input.is_action_just_pressed(Action::CycleDebug) {
            let config = self.raytracer.config_mut();
            config.debug_mode = config.debug_mode.next();
            info!("Debug mode: {}", config.debug_mode.label());
        }

        if self.input.is_action_just_pressed(Action::Screenshot) {
            self.capture_requested = true;
        }

        let mut title_changed = self.update_detail();

        let steps = self.input.selection_steps();
        if steps != 0 {
            let block = self.hotbar.scroll(steps);
            debug!("Selected {}", block.name());
            title_changed = true;
        }

        self.player
            .apply_look(self.input.look_delta(DEFAULT_SENSITIVITY));

        let ticks = self.timestep.advance(Duration::from_secs_f32(dt.max(0.0)));
        let controls = self.input.player_input();
        for _ in 0..ticks {
            self.player.tick(&mut self.grid, controls, &self.movement);
        }

        self.target = BlockTarget::pick(&self.grid, &self.player);
        if let Some(target) = self.target {
            let edited = if self.input.is_action_just_pressed(Action::Break) {
                break_block(&mut self.grid, &target).is_some()
            } else if self.input.is_action_just_pressed(Action::Place) {
                place_block(&mut self.grid, &target, self.hotbar.selected(), &self.player)
            } else {
                false
            };
            if edited {
                self.target = BlockTarget::pick(&self.grid, &self.player);
            }
        }

        if title_changed {
            ctx.set_title(&self.title());
        }

        self.input.end_frame();
    }

    fn render(&mut self, ctx: &AppContext, frame: &mut FrameContext<'_>) -> anyhow::Result<()> {
        let frame_number = frame.frame_number;

        self.volume.sync(&self.grid);
        let camera = Camera::from_player(
            &self.player,
            self.raytracer.config().fov,
            self.detail.resolution(),
        );
        let lighting = Lighting::at(ctx.elapsed().as_secs_f64() * 1000.0);
        self.raytracer.render(
            &self.volume,
            &self.atlas,
            &camera,
            &lighting,
            self.target.map(|t| t.cell()),
            frame.target,
        );

        let capturing = self.screenshot_config.should_capture(frame_number);
        if capturing || std::mem::take(&mut self.capture_requested) {
            let path = self.screenshot_config.output_path(frame_number);
            if let Err(e) = save_framebuffer(frame.target, &path) {
                error!("Failed to save screenshot: {e}");
            }
        }

        let arm = (frame.target.height() / 40).max(1);
        frame.target.draw_crosshair(arm);

        if self.screenshot_config.exit_after_capture
            && self.screenshot_config.all_captured(frame_number + 1)
        {
            info!("All screenshots captured, requesting exit...");
            self.should_exit = true;
        }

        Ok(())
    }

    fn on_event(&mut self, event: &WindowEvent) -> bool {
        if self.should_exit {
            return false;
        }
        self.input.process_window_event(event)
    }

    fn on_device_event(&mut self, _device_id: DeviceId, event: &DeviceEvent) {
        self.input.process_device_event(event);
    }

    fn should_exit(&self) -> bool {
        self.should_exit
    }
}

impl Viewer {
    fn title(&self) -> String {
        format!("{} - {}", self.detail.title(TITLE), self.hotbar.selected().name())
    }

    /// Apply the detail keys. Returns whether the level changed.
    fn update_detail(&mut self) -> bool {
        let detail = if self.input.is_action_just_pressed(Action::DetailUp) {
            self.detail.increased()
        } else if self.input.is_action_just_pressed(Action::DetailDown) {
            self.detail.decreased()
        } else {
            return false;
        };
        if detail == self.detail {
            return false;
        }
        self.detail = detail;
        let resolution = detail.resolution();
        debug!(
            "Detail level {} ({}x{})",
            detail.level(),
            resolution.x,
            resolution.y
        );
        true
    }
}
