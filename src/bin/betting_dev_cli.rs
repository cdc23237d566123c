// src/bin/betting_dev_cli.rs

use poker_betting::api::execute_json;
use poker_betting::domain::{Chips, TableConfig};
use poker_betting::engine::{BettingEngine, EngineError, PlayerActionKind, TableSnapshot};

fn main() {
    env_logger::init();

    println!("betting_dev_cli: прогоняем сценарии движка ставок…");

    if let Err(e) = run() {
        eprintln!("[DEV] ОШИБКА: {}", e);
        std::process::exit(1);
    }

    println!("betting_dev_cli: завершено.");
}

fn run() -> Result<(), EngineError> {
    // Конфиг можно передать первым аргументом как JSON.
    let config = match std::env::args().nth(1) {
        Some(raw) => match TableConfig::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("[DEV] конфиг отклонён ({}), берём значения по умолчанию", e);
                TableConfig::default()
            }
        },
        None => TableConfig::default(),
    };

    scenario_fold_win(&config)?;
    scenario_side_pots(&config)?;
    scenario_json_commands(&config);
    Ok(())
}

fn new_engine(config: &TableConfig, names: &[&str]) -> Result<BettingEngine, EngineError> {
    let mut engine = BettingEngine::default();
    engine.configure_blinds(config.small_blind, config.big_blind)?;
    for name in names {
        let seat = engine.add_player(name)?;
        engine.set_stack(seat, config.starting_stack)?;
    }
    Ok(engine)
}

/// Префлоп: все фолдят до большого блайнда.
fn scenario_fold_win(config: &TableConfig) -> Result<(), EngineError> {
    println!();
    println!("================ SCENARIO: FOLD WIN =================");

    let mut engine = new_engine(config, &["Alice", "Bob", "Carol"])?;
    print_table("после старта", &engine.start_hand()?);

    loop {
        let view = engine.apply_action(PlayerActionKind::Fold)?;
        print_table("после fold", &view);
        if view.active_player.is_none() {
            break;
        }
    }

    Ok(())
}

/// Два коротких стека идут в all-in, собираются сайд-поты.
fn scenario_side_pots(config: &TableConfig) -> Result<(), EngineError> {
    println!();
    println!("================ SCENARIO: SIDE POTS =================");

    let mut engine = new_engine(config, &["Alice", "Bob", "Carol"])?;
    engine.set_stack(1, Chips(config.starting_stack.0 / 4))?;
    engine.set_stack(2, Chips(config.starting_stack.0 / 2))?;
    engine.start_hand()?;

    engine.apply_action(PlayerActionKind::AllIn)?;
    engine.apply_action(PlayerActionKind::AllIn)?;
    let view = engine.apply_action(PlayerActionKind::Call)?;
    print_table("шоудаун", &view);

    for (idx, pot) in view.side_pots.iter().enumerate() {
        println!(
            "  пот #{}: {} (претенденты: {})",
            idx,
            pot.amount,
            pot.eligible_players.join(", ")
        );
    }

    // Главный пот – самому короткому, остальное – Alice.
    engine.award_pot("Bob", Some(0))?;
    let view = engine.award_pot("Alice", None)?;
    print_table("после выплаты", &view);

    Ok(())
}

/// Те же операции, но через JSON-команды, как их шлёт UI.
fn scenario_json_commands(config: &TableConfig) {
    println!();
    println!("================ SCENARIO: JSON COMMANDS =================");

    let mut engine = match BettingEngine::new(config.clone()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("[DEV] конфиг отклонён: {}", e);
            return;
        }
    };

    let commands = [
        r#"{"AddPlayer":{"name":"Alice"}}"#,
        r#"{"AddPlayer":{"name":"Bob"}}"#,
        r#""StartHand""#,
        r#"{"Action":{"action":"check"}}"#,
        r#"{"Action":{"action":"raise","amount":40}}"#,
        r#"{"Action":{"action":"call"}}"#,
        r#""ReturnToSetup""#,
    ];

    for raw in commands {
        match execute_json(&mut engine, raw) {
            Ok(response) => println!("> {}\n< {}", raw, response),
            Err(e) => println!("> {}\n! {:?}", raw, e),
        }
    }
}

fn print_table(title: &str, view: &TableSnapshot) {
    println!(
        "--- {} | стадия {} | банк {} | ставка {} ---",
        title, view.stage, view.pot, view.current_bet
    );
    for p in &view.players {
        let marker = if p.is_active { ">" } else { " " };
        let mut tags = Vec::new();
        if p.is_dealer {
            tags.push("D");
        }
        if p.is_small_blind {
            tags.push("SB");
        }
        if p.is_big_blind {
            tags.push("BB");
        }
        if p.folded {
            tags.push("fold");
        }
        if p.is_all_in {
            tags.push("all-in");
        }
        println!(
            "{} [{}] {:<8} стек {:>6} ставка {:>5} {}",
            marker,
            p.seat_index,
            p.name,
            p.stack,
            p.bet,
            tags.join(" ")
        );
    }
}
