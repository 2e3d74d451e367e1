//! Play-state machine
//!
//! The embedding driver calls [`Game::process_input`], [`Game::update`] and
//! [`Game::render`] once per frame, in that order. That fixed order is the
//! only synchronisation: input moves the ball, update feeds the trail one
//! snapshot of the moved ball, render draws the result.

use glam::Vec2;

use super::input::{InputMask, Key};
use super::particles::{ParticleEmitter, ParticleGenerator};
use super::scene::{Scene, Viewport};
use super::state::{BallObject, GameObject, PlayState};
use super::trail::TrailSet;
use crate::error::{GameError, GameResult};
use crate::renderer::GraphicsBackend;
use crate::settings::Settings;

/// Owns the play state, the input mask, the backend and, after `init`, the scene
pub struct Game<B: GraphicsBackend, E: ParticleEmitter = ParticleGenerator> {
    /// Gate for all per-frame work; the driver decides transitions
    pub state: PlayState,
    /// Written by the driver from raw key events
    pub keys: InputMask,
    viewport: Viewport,
    settings: Settings,
    backend: B,
    scene: Option<Scene<E>>,
}

impl<B: GraphicsBackend, E: ParticleEmitter> Game<B, E> {
    /// Create an uninitialised game; call [`Game::init`] before the first frame
    pub fn new(settings: Settings, backend: B) -> GameResult<Self> {
        let viewport =
            Viewport::new(settings.width, settings.height).ok_or(GameError::InvalidViewport {
                width: settings.width,
                height: settings.height,
            })?;
        settings.validate()?;

        Ok(Self {
            state: PlayState::Active,
            keys: InputMask::new(),
            viewport,
            settings,
            backend,
            scene: None,
        })
    }

    /// Load resources and build the scene. Later calls are ignored.
    pub fn init(&mut self) -> GameResult<()> {
        if self.scene.is_some() {
            log::warn!("init() called twice, ignoring");
            return Ok(());
        }
        let scene = Scene::bootstrap(&self.settings, self.viewport, &mut self.backend)?;
        self.scene = Some(scene);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.scene.is_some()
    }

    /// Steer the ball with the held keys and launch it on `Launch`
    pub fn process_input(&mut self, dt: f32) -> GameResult<()> {
        let scene = self.scene.as_mut().ok_or(GameError::NotInitialized)?;
        if !self.state.is_active() {
            return Ok(());
        }

        let keys = self.keys;
        let ball = &mut scene.ball;
        if !ball.stuck {
            let mut velocity = self.settings.ball_speed * dt.max(0.0);
            // 0 * inf
            if velocity.is_nan() {
                velocity = 0.0;
            }
            let max = (self.viewport.size() - ball.size).max(Vec2::ZERO);

            if keys.is_held(Key::Left) {
                ball.position.x = (ball.position.x - velocity).clamp(0.0, max.x);
            }
            if keys.is_held(Key::Right) {
                ball.position.x = (ball.position.x + velocity).clamp(0.0, max.x);
            }
            if keys.is_held(Key::Up) {
                ball.position.y = (ball.position.y - velocity).clamp(0.0, max.y);
            }
            if keys.is_held(Key::Down) {
                ball.position.y = (ball.position.y + velocity).clamp(0.0, max.y);
            }
        }
        if keys.is_held(Key::Launch) && ball.stuck {
            ball.launch();
            log::debug!("Ball launched at {:?}", ball.position);
        }
        Ok(())
    }

    /// Advance the trail emitters against this frame's ball
    pub fn update(&mut self, dt: f32) -> GameResult<()> {
        let scene = self.scene.as_mut().ok_or(GameError::NotInitialized)?;
        if !self.state.is_active() {
            return Ok(());
        }

        scene.trails.update(dt, &scene.ball);

        if self.check_loss() {
            self.reset_player()?;
        }
        Ok(())
    }

    /// Ball reached the bottom edge. Only enforced with `reset_on_loss`;
    /// the stock game never loses.
    fn check_loss(&self) -> bool {
        if !self.settings.reset_on_loss {
            return false;
        }
        self.scene
            .as_ref()
            .is_some_and(|s| s.ball.position.y >= self.viewport.height() as f32)
    }

    /// Background, ball, then the trail while the ball is free
    pub fn render(&mut self) -> GameResult<()> {
        let scene = self.scene.as_ref().ok_or(GameError::NotInitialized)?;
        if !self.state.is_active() {
            return Ok(());
        }

        let backend: &mut dyn GraphicsBackend = &mut self.backend;
        scene
            .renderer
            .draw_sprite(backend, scene.background, Vec2::ZERO, self.viewport.size(), 0.0);
        if self.settings.draw_paddle {
            scene.player.draw(&scene.renderer, backend);
        }
        scene.ball.draw(&scene.renderer, backend);
        scene.trails.draw(&scene.ball, backend);
        Ok(())
    }

    /// One full frame in the required order
    pub fn frame(&mut self, dt: f32) -> GameResult<()> {
        self.process_input(dt)?;
        self.update(dt)?;
        self.render()
    }

    /// Re-seat paddle and ball; trail emitters persist
    pub fn reset_player(&mut self) -> GameResult<()> {
        let scene = self.scene.as_mut().ok_or(GameError::NotInitialized)?;
        scene.reset_player(self.viewport);
        log::info!("Player reset");
        Ok(())
    }

    pub fn set_state(&mut self, state: PlayState) {
        if state != self.state {
            log::info!("Play state {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn ball(&self) -> Option<&BallObject> {
        self.scene.as_ref().map(|s| &s.ball)
    }

    pub fn ball_mut(&mut self) -> Option<&mut BallObject> {
        self.scene.as_mut().map(|s| &mut s.ball)
    }

    pub fn player(&self) -> Option<&GameObject> {
        self.scene.as_ref().map(|s| &s.player)
    }

    pub fn trails(&self) -> Option<&TrailSet<E>> {
        self.scene.as_ref().map(|s| &s.trails)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::renderer::HeadlessBackend;
    use crate::sim::particles::Particle;
    use crate::sim::trail::tests::RecordingEmitter;
    use proptest::prelude::*;

    const DT: f32 = 0.016;

    fn settings() -> Settings {
        Settings {
            emitter_capacity: 64,
            ..Settings::default()
        }
    }

    fn game() -> Game<HeadlessBackend> {
        let mut game = Game::new(settings(), HeadlessBackend::new()).unwrap();
        game.init().unwrap();
        game
    }

    fn recording_game() -> Game<HeadlessBackend, RecordingEmitter> {
        let mut game = Game::new(Settings::default(), HeadlessBackend::new()).unwrap();
        game.init().unwrap();
        game
    }

    fn launched_game() -> Game<HeadlessBackend> {
        let mut game = game();
        game.keys.press(Key::Launch);
        game.process_input(DT).unwrap();
        game.keys.release(Key::Launch);
        game
    }

    #[test]
    fn test_zero_viewport_rejected() {
        let result: GameResult<Game<HeadlessBackend>> =
            Game::new(Settings::with_viewport(0, 600), HeadlessBackend::new());
        assert!(matches!(
            result,
            Err(GameError::InvalidViewport { width: 0, height: 600 })
        ));
    }

    #[test]
    fn test_frame_ops_before_init_fail() {
        let mut game: Game<HeadlessBackend> =
            Game::new(settings(), HeadlessBackend::new()).unwrap();
        assert!(matches!(game.process_input(DT), Err(GameError::NotInitialized)));
        assert!(matches!(game.update(DT), Err(GameError::NotInitialized)));
        assert!(matches!(game.render(), Err(GameError::NotInitialized)));
        assert!(matches!(game.reset_player(), Err(GameError::NotInitialized)));
    }

    #[test]
    fn test_init_is_idempotent() {
        let mut game = game();
        let uploads = game.backend().texture_uploads();
        game.ball_mut().unwrap().position = Vec2::new(1.0, 1.0);
        game.init().unwrap();
        assert_eq!(game.backend().texture_uploads(), uploads);
        assert_eq!(game.ball().unwrap().position, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_failed_init_leaves_game_uninitialized() {
        let backend = HeadlessBackend::new().without_asset("textures/fire.png");
        let mut game: Game<HeadlessBackend> = Game::new(settings(), backend).unwrap();
        assert!(game.init().is_err());
        assert!(!game.is_initialized());
        assert!(matches!(game.update(DT), Err(GameError::NotInitialized)));
    }

    #[test]
    fn test_stuck_ball_ignores_direction_keys() {
        let mut game = game();
        let start = game.ball().unwrap().position;
        game.keys.press(Key::Left);
        game.keys.press(Key::Up);
        game.process_input(0.5).unwrap();
        assert_eq!(game.ball().unwrap().position, start);
    }

    #[test]
    fn test_launch_then_move() {
        let mut game = launched_game();
        assert!(!game.ball().unwrap().stuck);

        let start = game.ball().unwrap().position;
        game.keys.press(Key::Right);
        game.process_input(0.1).unwrap();
        let moved = game.ball().unwrap().position;
        assert!((moved.x - (start.x + 20.0)).abs() < 1e-4);
        assert_eq!(moved.y, start.y);
    }

    #[test]
    fn test_launch_and_move_same_frame_does_not_move() {
        let mut game = game();
        let start = game.ball().unwrap().position;
        game.keys.press(Key::Launch);
        game.keys.press(Key::Down);
        game.process_input(0.1).unwrap();
        assert!(!game.ball().unwrap().stuck);
        assert_eq!(game.ball().unwrap().position, start);
    }

    #[test]
    fn test_movement_clamped_to_viewport() {
        let mut game = launched_game();
        game.keys.press(Key::Left);
        game.keys.press(Key::Up);
        game.process_input(100.0).unwrap();
        assert_eq!(game.ball().unwrap().position, Vec2::ZERO);

        game.keys.clear();
        game.keys.press(Key::Right);
        game.keys.press(Key::Down);
        game.process_input(100.0).unwrap();
        let ball = game.ball().unwrap();
        assert_eq!(ball.position, Vec2::new(800.0 - ball.size.x, 600.0 - ball.size.y));
    }

    #[test]
    fn test_update_feeds_one_snapshot_to_all_emitters() {
        let mut game = recording_game();
        game.update(DT).unwrap();

        let trails = game.trails().unwrap();
        assert_eq!(trails.len(), 3);
        let positions: Vec<Vec2> = trails
            .emitters()
            .map(|e| {
                assert_eq!(e.updates.len(), 1);
                e.updates[0].1.position
            })
            .collect();
        assert!(positions.iter().all(|p| *p == Vec2::new(320.0, 420.0)));
        assert!(trails.emitters().all(|e| e.updates[0].0 == DT));
    }

    #[test]
    fn test_update_sees_input_from_same_frame() {
        let mut game = recording_game();
        game.ball_mut().unwrap().launch();
        game.keys.press(Key::Left);
        game.process_input(0.1).unwrap();
        game.update(0.1).unwrap();
        let expected = game.ball().unwrap().position;
        assert!(
            game.trails()
                .unwrap()
                .emitters()
                .all(|e| e.updates[0].1.position == expected)
        );
    }

    #[test]
    fn test_render_order_and_trail_gating() {
        let mut game = recording_game();
        game.render().unwrap();
        {
            let sprites = &game.backend().sprites;
            assert_eq!(sprites.len(), 2);
            assert_eq!(sprites[0].position, Vec2::ZERO);
            assert_eq!(sprites[0].size, Vec2::new(800.0, 600.0));
            assert_eq!(sprites[1].position, Vec2::new(320.0, 420.0));
            assert_eq!(sprites[1].size, Vec2::splat(2.0 * BALL_RADIUS));
        }
        assert!(game.trails().unwrap().emitters().all(|e| e.draws.get() == 0));

        game.ball_mut().unwrap().launch();
        game.render().unwrap();
        assert!(game.trails().unwrap().emitters().all(|e| e.draws.get() == 1));
    }

    #[test]
    fn test_paddle_drawn_only_when_enabled() {
        let mut game = game();
        game.render().unwrap();
        assert_eq!(game.backend().sprites.len(), 2);

        let settings = Settings {
            draw_paddle: true,
            ..settings()
        };
        let mut game: Game<HeadlessBackend> = Game::new(settings, HeadlessBackend::new()).unwrap();
        game.init().unwrap();
        game.render().unwrap();
        let sprites = &game.backend().sprites;
        assert_eq!(sprites.len(), 3);
        assert_eq!(sprites[1].position, Vec2::new(350.0, 580.0));
        assert_eq!(sprites[1].size, PLAYER_SIZE);
    }

    #[test]
    fn test_launched_frame_draws_particles() {
        let mut game = launched_game();
        game.frame(DT).unwrap();
        assert_eq!(game.backend().particle_batches.len(), 3);
        assert_eq!(game.backend().particles_drawn(), 3 * 40);
    }

    #[test]
    fn test_reset_player_restores_seat() {
        let mut game = launched_game();
        game.keys.press(Key::Left);
        game.keys.press(Key::Up);
        for _ in 0..30 {
            game.frame(DT).unwrap();
        }
        game.ball_mut().unwrap().velocity = Vec2::new(120.0, -300.0);
        let live_before = game.trails().unwrap().live_count();

        game.reset_player().unwrap();
        let player = game.player().unwrap();
        let ball = game.ball().unwrap();
        assert_eq!(player.position, Vec2::new(350.0, 580.0));
        assert_eq!(player.size, PLAYER_SIZE);
        assert_eq!(
            ball.position,
            player.position + Vec2::new(PLAYER_SIZE.x / 2.0 - BALL_RADIUS, -2.0 * BALL_RADIUS)
        );
        assert_eq!(ball.velocity, INITIAL_BALL_VELOCITY);
        assert!(ball.stuck);
        // Emitters survive the reset untouched
        assert_eq!(game.trails().unwrap().len(), 3);
        assert_eq!(game.trails().unwrap().live_count(), live_before);
    }

    #[test]
    fn test_no_loss_reset_by_default() {
        let mut game = launched_game();
        game.ball_mut().unwrap().position.y = 600.0;
        game.update(DT).unwrap();
        assert!(!game.ball().unwrap().stuck);
    }

    #[test]
    fn test_loss_reset_when_enabled() {
        let settings = Settings {
            reset_on_loss: true,
            ..settings()
        };
        let mut game: Game<HeadlessBackend> = Game::new(settings, HeadlessBackend::new()).unwrap();
        game.init().unwrap();
        game.ball_mut().unwrap().launch();
        game.ball_mut().unwrap().position.y = 600.0;
        game.update(DT).unwrap();
        let ball = game.ball().unwrap();
        assert!(ball.stuck);
        assert_eq!(ball.position, Vec2::new(320.0, 420.0));
    }

    fn pools(game: &Game<HeadlessBackend>) -> Vec<Vec<Particle>> {
        game.trails()
            .unwrap()
            .emitters()
            .map(|e| e.particles().to_vec())
            .collect()
    }

    #[test]
    fn test_inactive_states_freeze_everything() {
        for state in [PlayState::Menu, PlayState::Win] {
            let mut game = launched_game();
            game.frame(DT).unwrap();
            game.backend_mut().clear_draws();

            let ball = game.ball().unwrap().clone();
            let player = game.player().unwrap().clone();
            let particles = pools(&game);

            game.set_state(state);
            game.keys.press(Key::Right);
            game.keys.press(Key::Down);
            for _ in 0..5 {
                game.frame(DT).unwrap();
            }

            assert_eq!(game.ball().unwrap(), &ball);
            assert_eq!(game.player().unwrap(), &player);
            assert_eq!(pools(&game), particles);
            assert!(game.backend().sprites.is_empty());
            assert!(game.backend().particle_batches.is_empty());
        }
    }

    #[test]
    fn test_menu_ignores_launch() {
        let mut game = game();
        game.set_state(PlayState::Menu);
        game.keys.press(Key::Launch);
        game.process_input(DT).unwrap();
        assert!(game.ball().unwrap().stuck);
    }

    #[test]
    fn test_infinite_dt_keeps_ball_in_viewport() {
        let settings = Settings {
            ball_speed: 0.0,
            ..settings()
        };
        let mut game: Game<HeadlessBackend> = Game::new(settings, HeadlessBackend::new()).unwrap();
        game.init().unwrap();
        game.ball_mut().unwrap().launch();
        game.keys.press(Key::Left);
        game.process_input(f32::INFINITY).unwrap();
        assert_eq!(game.ball().unwrap().position, Vec2::new(320.0, 420.0));

        let mut game = launched_game();
        game.keys.press(Key::Left);
        game.keys.press(Key::Down);
        game.process_input(f32::INFINITY).unwrap();
        game.process_input(f32::NAN).unwrap();
        let ball = game.ball().unwrap();
        assert_eq!(ball.position, Vec2::new(0.0, 600.0 - ball.size.y));
    }

    fn arb_keys() -> impl Strategy<Value = InputMask> {
        prop::array::uniform4(any::<bool>()).prop_map(|[l, r, u, d]| {
            let mut keys = InputMask::new();
            keys.set(Key::Left, l);
            keys.set(Key::Right, r);
            keys.set(Key::Up, u);
            keys.set(Key::Down, d);
            keys
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_ball_stays_in_viewport(
            steps in prop::collection::vec((arb_keys(), 0.0f32..2.0), 1..40),
        ) {
            let mut game = launched_game();
            for (keys, dt) in steps {
                game.keys = keys;
                game.process_input(dt).unwrap();
                let ball = game.ball().unwrap();
                prop_assert!(ball.position.x >= 0.0 && ball.position.x <= 800.0 - ball.size.x);
                prop_assert!(ball.position.y >= 0.0 && ball.position.y <= 600.0 - ball.size.y);
            }
        }
    }
}
