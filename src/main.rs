use duelforge::{roster, BattleRunner, BotPolicy, Tournament};

fn main() {
    // Example 1: a seeded bot-vs-bot duel with the full transcript.
    let knight = roster::knight("Sir Aldric");
    let orc = roster::orc("Grum the Render");

    let mut runner = BattleRunner::with_seed("exhibition", knight, orc, 2024);
    let mut challenger_bot = BotPolicy::new();
    let mut defender_bot = BotPolicy::new();

    println!("=== Exhibition duel: Sir Aldric vs Grum the Render ===");
    let result = runner.run_to_completion(&mut challenger_bot, &mut defender_bot);
    runner.print_transcript();

    match result.winner {
        Some(index) => println!(
            "\nWinner after {} rounds: {}",
            runner.state().round,
            runner.state().combatants[index].name
        ),
        None => println!("\nThe duel ended in a draw."),
    }

    // Final snapshot, as a front end would consume it.
    let info = runner.battle_info();
    println!(
        "\nFinal state:\n{}",
        serde_json::to_string_pretty(&info.combatants).expect("snapshots serialize")
    );

    // Example 2: a full seeded tournament run.
    println!("\n=== Tournament: Kage the Silent enters ===");
    let mut tournament = Tournament::new(roster::ninja("Kage the Silent"), 77);
    let mut player_bot = BotPolicy::new();

    while !tournament.is_over() {
        match tournament.play_round(&mut player_bot) {
            Ok(report) => {
                println!(
                    "Round {} at {} ({}) vs {}: {}{}",
                    report.round,
                    report.arena_name,
                    report.weather_name,
                    report.opponent_name,
                    if report.victory { "victory" } else { "defeat" },
                    if report.gold_awarded > 0 {
                        format!(", +{} gold", report.gold_awarded)
                    } else {
                        String::new()
                    }
                );
                if !report.victory {
                    break;
                }
            }
            Err(err) => {
                println!("Tournament error: {}", err);
                break;
            }
        }
    }

    if tournament.is_champion() {
        println!("Kage the Silent is the tournament champion!");
    } else {
        println!(
            "The run ends after {} win(s) with {} gold banked.",
            tournament.wins, tournament.player.gold
        );
    }
}
