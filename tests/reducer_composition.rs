mod common;

use primetime::mvi::{combine, from_fn, pullback, Lens, Reducer, ReducerExt};
use primetime::{lens, prism};

#[derive(Debug, Clone, PartialEq, Default)]
struct Settings {
    volume: u8,
    muted: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Player {
    settings: Settings,
    track: usize,
}

#[derive(Debug, Clone, PartialEq)]
enum SettingsAction {
    Louder,
    ToggleMute,
}

#[derive(Debug, Clone, PartialEq)]
enum PlayerAction {
    Settings(SettingsAction),
    Next(usize),
}

fn settings_reducer() -> impl Reducer<State = Settings, Action = SettingsAction> + Send + Sync + 'static
{
    from_fn(|mut state: Settings, action: &SettingsAction| {
        match action {
            SettingsAction::Louder => state.volume = state.volume.saturating_add(1),
            SettingsAction::ToggleMute => state.muted = !state.muted,
        }
        state
    })
}

fn track_reducer() -> impl Reducer<State = usize, Action = usize> + Send + Sync + 'static {
    from_fn(|state: usize, by: &usize| state + by)
}

fn player_reducer() -> impl Reducer<State = Player, Action = PlayerAction> {
    combine(vec![
        settings_reducer()
            .pullback(lens!(Player, settings), prism!(PlayerAction::Settings))
            .boxed(),
        track_reducer()
            .pullback(lens!(Player, track), prism!(PlayerAction::Next))
            .boxed(),
    ])
}

#[test]
fn test_pulled_back_reducers_touch_only_their_part() {
    let reducer = player_reducer();
    let state = reducer.reduce(Player::default(), &PlayerAction::Settings(SettingsAction::Louder));
    assert_eq!(state.settings.volume, 1);
    assert_eq!(state.track, 0);

    let state = reducer.reduce(state, &PlayerAction::Next(2));
    assert_eq!(state.track, 2);
    assert_eq!(state.settings.volume, 1);
}

#[test]
fn test_toggle_mute_leaves_other_fields_alone() {
    let reducer = player_reducer();
    let start = Player {
        settings: Settings {
            volume: 7,
            muted: false,
        },
        track: 3,
    };

    let state = reducer.reduce(
        start.clone(),
        &PlayerAction::Settings(SettingsAction::ToggleMute),
    );
    assert!(state.settings.muted);
    assert_eq!(state.settings.volume, 7);
    assert_eq!(state.track, 3);

    let state = reducer.reduce(state, &PlayerAction::Settings(SettingsAction::ToggleMute));
    assert_eq!(state, start);
}

#[test]
fn test_nested_field_lens() {
    let muted: Lens<Player, bool> = lens!(Player, settings.muted);
    let reducer = pullback(
        from_fn(|state: bool, _: &()| !state),
        muted,
        primetime::mvi::Prism::identity(),
    );
    let state = reducer.reduce(Player::default(), &());
    assert!(state.settings.muted);
    assert_eq!(state.settings.volume, 0);
}

#[test]
fn test_lens_composition_matches_path_lens() {
    let composed = lens!(Player, settings).then(lens!(Settings, volume));
    let direct = lens!(Player, settings.volume);

    let mut a = Player::default();
    let mut b = Player::default();
    composed.set(&mut a, 9);
    direct.set(&mut b, 9);
    assert_eq!(a, b);
    assert_eq!(composed.get(&a), direct.get(&b));
}

#[test]
fn test_combined_reducers_run_in_order() {
    let twice_then_add = from_fn(|state: i32, _: &()| state * 2)
        .combine_with(from_fn(|state: i32, _: &()| state + 1));
    assert_eq!(twice_then_add.reduce(5, &()), 11);
}
