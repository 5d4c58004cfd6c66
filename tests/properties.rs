// Property tests for the simulation rules.

use chroma_tap::Tuning;
use chroma_tap::consts::SIM_DT;
use chroma_tap::sim::{Enemy, EnemyColor, GameEvent, GamePhase, GameState, handle_hit, select_color, tick};
use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn color() -> impl Strategy<Value = EnemyColor> {
    prop::sample::select(EnemyColor::ALL.to_vec())
}

fn enemy(min_x: f32) -> impl Strategy<Value = Enemy> {
    (min_x..1000.0f32, 0.0..560.0f32, 0.3..0.6f32, color()).prop_map(|(x, y, speed, color)| Enemy {
        pos: Vec2::new(x, y),
        size: 40.0,
        color,
        speed,
    })
}

fn playing(enemies: Vec<Enemy>, score: u64, combo: u32, defeated: u32) -> GameState {
    let mut state = GameState::new(Vec2::new(1000.0, 600.0));
    state.phase = GamePhase::Playing;
    state.enemies = enemies;
    state.score = score;
    state.combo = combo;
    state.enemies_defeated = defeated;
    state
}

proptest! {
    #[test]
    fn tick_only_moves_enemies(
        enemies in prop::collection::vec(enemy(1.0), 0..20),
        score in 0u64..1_000_000,
        combo in 0u32..100,
    ) {
        let tuning = Tuning::default();
        let mut state = playing(enemies.clone(), score, combo, 0);

        let events = tick(&mut state, &tuning, SIM_DT);

        prop_assert!(events.is_empty());
        prop_assert!(state.is_playing());
        prop_assert_eq!(state.score, score);
        prop_assert_eq!(state.combo, combo);
        prop_assert_eq!(state.enemies.len(), enemies.len());
        for (after, before) in state.enemies.iter().zip(&enemies) {
            prop_assert_eq!(after.pos.x, before.pos.x - before.speed);
            prop_assert_eq!(after.pos.y, before.pos.y);
        }
    }

    #[test]
    fn any_breach_ends_once(
        mut enemies in prop::collection::vec(enemy(1.0), 0..10),
        breaching in prop::collection::vec(0.0..0.29f32, 1..5),
        score in 0u64..10_000,
    ) {
        let tuning = Tuning::default();
        for x in &breaching {
            enemies.push(Enemy { pos: Vec2::new(*x, 10.0), size: 40.0, color: EnemyColor::Red, speed: 0.3 });
        }
        let mut state = playing(enemies, score, 0, 0);

        let events = tick(&mut state, &tuning, SIM_DT);

        prop_assert_eq!(events, vec![GameEvent::GameOver { final_score: score }]);
        prop_assert!(state.is_game_over());
        prop_assert!(state.enemies.iter().all(|e| e.pos.x > 0.0));
        prop_assert!(tick(&mut state, &tuning, SIM_DT).is_empty());
    }

    #[test]
    fn matching_hit_rule(
        target in enemy(0.0),
        combo in 0u32..100,
        score in 0u64..1_000_000,
        defeated in 0u32..200,
        seed in any::<u64>(),
    ) {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut state = playing(vec![target], score, combo, defeated);
        state.selected = target.color;

        handle_hit(&mut state, &tuning, &mut rng, target.pos + 20.0);

        prop_assert_eq!(state.combo, combo + 1);
        prop_assert_eq!(state.score, score + 100 * u64::from(combo + 1));
        prop_assert_eq!(state.enemies_defeated, defeated + 1);
        let expected = if (defeated + 1) % 5 == 0 { 2 } else { 1 };
        prop_assert_eq!(state.enemies.len(), expected);
    }

    #[test]
    fn wrong_color_rule(
        target in enemy(0.0),
        combo in 0u32..100,
        score in 0u64..1_000_000,
        seed in any::<u64>(),
    ) {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut state = playing(vec![target], score, combo, 3);
        state.selected = EnemyColor::ALL.into_iter().find(|c| *c != target.color).unwrap();

        handle_hit(&mut state, &tuning, &mut rng, target.pos + 20.0);

        prop_assert_eq!(state.combo, 0);
        prop_assert_eq!(state.score, score);
        prop_assert_eq!(state.enemies_defeated, 3);
        prop_assert_eq!(state.enemies, vec![target]);
    }

    #[test]
    fn empty_space_is_noop(
        enemies in prop::collection::vec(enemy(200.0), 0..10),
        combo in 0u32..100,
        px in 0.0..199.0f32,
        py in 0.0..600.0f32,
    ) {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = playing(enemies.clone(), 500, combo, 0);

        let events = handle_hit(&mut state, &tuning, &mut rng, Vec2::new(px, py));

        prop_assert!(events.is_empty());
        prop_assert_eq!(state.combo, combo);
        prop_assert_eq!(state.score, 500);
        prop_assert_eq!(state.enemies, enemies);
    }

    #[test]
    fn color_switch_resets_combo(combo in 0u32..1000, next in color()) {
        let mut state = playing(Vec::new(), 0, combo, 0);
        select_color(&mut state, next);
        prop_assert_eq!(state.combo, 0);
        prop_assert_eq!(state.selected, next);
    }
}
