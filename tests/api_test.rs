use poker_betting::{
    api::{
        commands::{execute, execute_json, ActionCommand, Command},
        dto::CommandResponse,
        errors::ApiError,
        queries::{build_table_view, query, Query, QueryResponse},
    },
    domain::{ChipSet, Chips, Stage},
    engine::{BettingEngine, EngineError, HandEventKind, InvalidActionReason},
};

/// Утилита: выполнить команду и достать состояние стола из ответа.
fn table_state(engine: &mut BettingEngine, command: Command) -> poker_betting::api::TableViewDto {
    match execute(engine, command).unwrap() {
        CommandResponse::TableState(view) => view,
        other => panic!("ожидали TableState, получили {:?}", other),
    }
}

fn action(name: &str, amount: Option<u64>) -> Command {
    Command::Action(ActionCommand {
        player: None,
        action: name.to_string(),
        amount: amount.map(Chips),
    })
}

fn seated(names: &[&str]) -> BettingEngine {
    let mut engine = BettingEngine::default();
    for name in names {
        execute(
            &mut engine,
            Command::AddPlayer {
                name: name.to_string(),
            },
        )
        .unwrap();
    }
    engine
}

// ----------------------
// commands.rs
// ----------------------

#[test]
fn add_player_returns_seat_index() {
    let mut engine = BettingEngine::default();

    let resp = execute(
        &mut engine,
        Command::AddPlayer {
            name: "Ann".to_string(),
        },
    )
    .unwrap();

    assert_eq!(resp, CommandResponse::PlayerAdded { seat_index: 0 });
}

#[test]
fn full_hand_through_commands() {
    let mut engine = seated(&["Ann", "Bob"]);

    let view = table_state(&mut engine, Command::StartHand);
    assert_eq!(view.stage, Stage::Preflop);
    assert_eq!(view.active_player_name(), Some("Ann"));

    table_state(&mut engine, action("call", None));
    let view = table_state(&mut engine, action("check", None));
    assert_eq!(view.stage, Stage::Flop);

    table_state(&mut engine, action("bet", Some(30)));
    let view = table_state(&mut engine, action("fold", None));
    assert_eq!(view.stage, Stage::Showdown);
    assert_eq!(view.player("Bob").unwrap().stack, Chips(1_010));

    let view = table_state(&mut engine, Command::StartNewHand);
    assert_eq!(view.dealer_index, 1);
}

#[test]
fn setup_commands_change_table() {
    let mut engine = seated(&["Ann", "Bob", "Cid"]);

    table_state(
        &mut engine,
        Command::ConfigureBlinds {
            small_blind: Chips(25),
            big_blind: Chips(50),
        },
    );
    table_state(
        &mut engine,
        Command::SetStack {
            seat_index: 0,
            amount: Chips(500),
        },
    );
    table_state(
        &mut engine,
        Command::SetStackFromChips {
            seat_index: 1,
            chips: ChipSet {
                black: 2,
                ..ChipSet::default()
            },
        },
    );
    let view = table_state(&mut engine, Command::RemovePlayer { seat_index: 2 });

    assert_eq!(view.big_blind, Chips(50));
    assert_eq!(view.players.len(), 2);
    assert_eq!(view.players[0].stack, Chips(500));
    assert_eq!(view.players[1].stack, Chips(200));
    assert_eq!(view.players[1].chips.black, 2);
}

#[test]
fn engine_errors_map_to_api_errors() {
    let mut engine = seated(&["Ann", "Bob"]);
    execute(&mut engine, Command::StartHand).unwrap();

    assert!(matches!(
        execute(&mut engine, action("check", None)),
        Err(ApiError::InvalidAction(_))
    ));
    assert!(matches!(
        execute(&mut engine, action("raise", None)),
        Err(ApiError::BadRequest(_))
    ));
    assert!(matches!(
        execute(&mut engine, action("dance", None)),
        Err(ApiError::BadRequest(_))
    ));
    assert!(matches!(
        execute(
            &mut engine,
            Command::AwardPot {
                winner: "Ann".to_string(),
                pot_index: None
            }
        ),
        Err(ApiError::InvalidCommand(_))
    ));

    let err: ApiError = EngineError::PlayerNotFound("Zed".to_string()).into();
    assert!(matches!(err, ApiError::PlayerNotFound(_)));
    let err: ApiError = EngineError::NoPotToAward.into();
    assert!(matches!(err, ApiError::PotError(_)));
    let err: ApiError = EngineError::from(InvalidActionReason::NoChipsLeft).into();
    assert!(matches!(err, ApiError::InvalidAction(_)));
}

#[test]
fn split_and_return_to_setup_commands() {
    let mut engine = seated(&["Ann", "Bob"]);
    execute(&mut engine, Command::StartHand).unwrap();
    execute(&mut engine, action("all-in", None)).unwrap();
    let view = table_state(&mut engine, action("call", None));
    assert_eq!(view.stage, Stage::Showdown);
    assert_eq!(view.pot, Chips(2_000));

    let view = table_state(
        &mut engine,
        Command::SplitPot {
            winners: vec!["Ann".to_string(), "Bob".to_string()],
            pot_index: None,
        },
    );
    assert_eq!(view.player("Ann").unwrap().stack, Chips(1_000));
    assert_eq!(view.player("Bob").unwrap().stack, Chips(1_000));

    let view = table_state(&mut engine, Command::ReturnToSetup);
    assert_eq!(view.stage, Stage::Setup);

    let view = table_state(&mut engine, Command::ResetStacksAndSetup);
    assert_eq!(view.total_chips, Chips(2_000));
}

#[test]
fn json_commands_round_trip() {
    let mut engine = BettingEngine::default();

    let resp = execute_json(&mut engine, r#"{"AddPlayer":{"name":"Ann"}}"#).unwrap();
    assert_eq!(resp, r#"{"PlayerAdded":{"seat_index":0}}"#);
    execute_json(&mut engine, r#"{"AddPlayer":{"name":"Bob"}}"#).unwrap();
    execute_json(&mut engine, r#""StartHand""#).unwrap();
    execute_json(&mut engine, r#"{"Action":{"action":"raise","amount":40}}"#).unwrap();

    assert_eq!(engine.current_bet(), Chips(40));
    assert!(matches!(
        execute_json(&mut engine, "{broken"),
        Err(ApiError::BadRequest(_))
    ));
}

// ----------------------
// queries.rs
// ----------------------

#[test]
fn table_view_marks_positions() {
    let mut engine = seated(&["Ann", "Bob", "Cid"]);
    engine.start_hand().unwrap();

    let view = build_table_view(&engine);

    assert!(view.players[0].is_dealer && view.players[0].is_active);
    assert!(view.players[1].is_small_blind);
    assert!(view.players[2].is_big_blind);
    assert_eq!(view.players[2].bet, Chips(10));
    assert_eq!(view.total_chips, Chips(3_000));
    assert_eq!(view.hand_number, 1);
}

#[test]
fn table_view_mirrors_engine_snapshot() {
    let mut engine = seated(&["Ann", "Bob", "Cid"]);
    let snapshot = engine.start_hand().unwrap();

    let view = build_table_view(&engine);

    assert_eq!(view.stage, snapshot.stage);
    assert_eq!(view.pot, snapshot.pot);
    assert_eq!(view.active_player, snapshot.active_player);
    assert_eq!(view.players.len(), snapshot.players.len());
    for (dto, seat) in view.players.iter().zip(&snapshot.players) {
        assert_eq!(dto.name, seat.name);
        assert_eq!(dto.stack, seat.stack);
        assert_eq!(dto.is_big_blind, seat.is_big_blind);
        assert_eq!(dto.chips, ChipSet::from_amount(seat.stack));
    }
}

#[test]
fn history_and_stats_queries() {
    let mut engine = seated(&["Ann", "Bob", "Cid"]);
    engine.start_hand().unwrap();
    execute(&mut engine, action("fold", None)).unwrap();
    execute(&mut engine, action("fold", None)).unwrap();

    match query(&engine, &Query::GetHistory) {
        QueryResponse::History(history) => {
            assert_eq!(history.hand_number, 1);
            assert!(history
                .events
                .iter()
                .any(|e| matches!(e.kind, HandEventKind::HandFinished { hand_number: 1 })));
        }
        other => panic!("ожидали History, получили {:?}", other),
    }

    match query(&engine, &Query::GetStats) {
        QueryResponse::Stats(stats) => {
            let cid = stats.iter().find(|s| s.name == "Cid").unwrap();
            assert_eq!(cid.pots_won, 1);
            assert_eq!(cid.chips_won, Chips(15));
            assert_eq!(cid.net, 5);
            assert_eq!(cid.hands_played, 1);
            assert_eq!(cid.total_bet, Chips(10));

            let bob = stats.iter().find(|s| s.name == "Bob").unwrap();
            assert_eq!(bob.net, -5);
        }
        other => panic!("ожидали Stats, получили {:?}", other),
    }

    assert!(matches!(
        query(&engine, &Query::GetTable),
        QueryResponse::Table(_)
    ));
}
