use robot_duel_core::engine::{
    BattleEngine, BattleStatus, EngineOptions, Seat, TieBreak, ROUND_REGEN,
};
use robot_duel_core::error::{EngineError, ProcessError, StartError, SubmitError};
use robot_duel_core::sim::{Action, ActionKind, FixedRoll, Robot, RobotStats, StatOverrides};

fn stats(hp: u32, attack: u32, defense: u32, speed: u32) -> RobotStats {
    RobotStats {
        hp,
        attack,
        defense,
        speed,
    }
}

fn fixed_engine(a: RobotStats, b: RobotStats) -> BattleEngine<FixedRoll> {
    let mut engine = BattleEngine::with_roller(
        Robot::new("Alpha", "p1", a),
        Robot::new("Beta", "p2", b),
        FixedRoll(0),
        EngineOptions::default(),
    )
    .expect("distinct owners");
    engine.start().expect("fresh engine starts");
    engine
}

fn play_round<R: robot_duel_core::sim::DamageRoll>(
    engine: &mut BattleEngine<R>,
    a: Action,
    b: Action,
) -> robot_duel_core::engine::RoundOutcome {
    engine.submit("p1", a).expect("p1 action accepted");
    engine.submit("p2", b).expect("p2 action accepted");
    engine.process_round().expect("round resolves")
}

#[test]
fn equal_robots_trade_attacks() {
    for seed in 0..20 {
        let mut engine = BattleEngine::new(
            Robot::new("Alpha", "p1", RobotStats::default()),
            Robot::new("Beta", "p2", RobotStats::default()),
            seed,
        )
        .expect("distinct owners");
        engine.start().expect("starts");
        let outcome = play_round(&mut engine, Action::Attack, Action::Attack);

        assert_eq!(outcome.round, 1);
        assert_eq!(outcome.results.len(), 2);
        for result in &outcome.results {
            assert!(result.success);
            assert!((12..=18).contains(&result.damage), "damage {}", result.damage);
        }
        for seat in Seat::BOTH {
            let robot = engine.robot(seat);
            assert!(robot.is_alive());
            assert!((82..=88).contains(&robot.current_hp()));
            assert_eq!(robot.energy(), ROUND_REGEN);
        }
        assert_eq!(engine.current_round(), 2);
        assert_eq!(engine.phase(), BattleStatus::InProgress);
    }
}

#[test]
fn faster_lethal_attack_prevents_slower_action() {
    for seed in 0..20 {
        let mut engine = BattleEngine::new(
            Robot::new("X", "x", stats(100, 20, 5, 20)),
            Robot::new("Y", "y", stats(10, 20, 0, 5)),
            seed,
        )
        .expect("distinct owners");
        engine.start().expect("starts");
        engine.submit("x", Action::Attack).expect("accepted");
        engine.submit("y", Action::Defend).expect("accepted");
        let outcome = engine.process_round().expect("resolves");

        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].robot, "X");
        assert!(!engine.robot(Seat::B).is_alive());
        assert_eq!(engine.robot(Seat::B).energy(), 0);
        assert!(!engine.robot(Seat::B).is_defending());
        assert_eq!(engine.phase(), BattleStatus::Finished);
        assert_eq!(engine.winner().map(Robot::name), Some("X"));
        assert_eq!(outcome.status.winner.as_deref(), Some("X"));
        // No end-of-round regeneration after a knockout.
        assert_eq!(engine.robot(Seat::A).energy(), 0);
        assert_eq!(engine.current_round(), 2);
        assert_eq!(
            engine.log().last().map(|entry| entry.message.as_str()),
            Some("X wins!")
        );

        assert_eq!(engine.process_round(), Err(ProcessError::Finished));
        assert_eq!(
            engine.submit("x", Action::Attack),
            Err(SubmitError::NotInProgress)
        );
        assert_eq!(engine.current_round(), 2);
    }
}

#[test]
fn skill_is_rejected_without_enough_energy() {
    let mut engine = fixed_engine(RobotStats::default(), RobotStats::default());
    play_round(&mut engine, Action::Defend, Action::Attack);
    assert_eq!(engine.robot(Seat::A).current_hp(), 95);
    play_round(&mut engine, Action::Attack, Action::Attack);
    assert_eq!(engine.robot(Seat::A).energy(), 20);

    let rejected = engine.submit_action("p1", ActionKind::Skill, None, Some(0));
    assert_eq!(
        rejected,
        Err(SubmitError::InsufficientEnergy {
            required: 30,
            available: 20,
        })
    );
    assert!(!engine.has_pending(Seat::A));
    assert!(engine.status().pending.is_empty());
}

#[test]
fn charged_strike_damages_and_refunds_energy() {
    let mut engine = fixed_engine(RobotStats::default(), RobotStats::default());
    play_round(&mut engine, Action::Charge, Action::Charge);
    play_round(&mut engine, Action::Charge, Action::Charge);
    assert_eq!(engine.robot(Seat::A).energy(), 60);

    let outcome = play_round(&mut engine, Action::Skill { index: 2 }, Action::Charge);
    let strike = &outcome.results[0];
    assert!(strike.success);
    assert_eq!(strike.action, ActionKind::Skill);
    // 20 * 2.0 = 40 raw, minus 5 defense
    assert_eq!(strike.damage, 35);
    assert_eq!(strike.heal, 0);
    assert_eq!(strike.message, "Alpha uses Charged Strike on Beta for 35 damage");
    assert_eq!(engine.robot(Seat::B).current_hp(), 65);
    // 60 - 50 cost + 20 refund + 5 regen
    assert_eq!(engine.robot(Seat::A).energy(), 35);
}

#[test]
fn repair_heals_the_user() {
    let mut engine = fixed_engine(RobotStats::default(), RobotStats::default());
    play_round(&mut engine, Action::Charge, Action::Attack);
    play_round(&mut engine, Action::Charge, Action::Attack);
    assert_eq!(engine.robot(Seat::A).current_hp(), 70);
    assert_eq!(engine.robot(Seat::A).energy(), 60);

    let outcome = play_round(&mut engine, Action::Skill { index: 1 }, Action::Attack);
    let repair = &outcome.results[0];
    assert!(repair.success);
    assert_eq!(repair.heal, 30);
    assert_eq!(repair.damage, 0);
    assert_eq!(repair.message, "Alpha uses Repair and restores 30 hp");
    assert_eq!(engine.robot(Seat::A).current_hp(), 85);
    assert_eq!(engine.robot(Seat::B).current_hp(), 100);
}

#[test]
fn defend_only_shields_when_resolved_first() {
    let mut engine = fixed_engine(stats(100, 20, 5, 10), stats(100, 20, 5, 20));
    let outcome = play_round(&mut engine, Action::Attack, Action::Defend);
    assert_eq!(outcome.results[0].robot, "Beta");
    // 20 halved to 10, minus 5 defense
    assert_eq!(outcome.results[1].damage, 5);
    assert_eq!(engine.robot(Seat::B).current_hp(), 95);
    assert_eq!(engine.robot(Seat::B).energy(), 15);
    assert!(engine.robot(Seat::B).is_defending());

    let outcome = play_round(&mut engine, Action::Attack, Action::Attack);
    assert!(!engine.robot(Seat::B).is_defending());
    assert_eq!(outcome.results[1].damage, 15);
    assert_eq!(engine.robot(Seat::B).current_hp(), 80);
}

#[test]
fn faster_robot_acts_first() {
    let mut engine = fixed_engine(stats(100, 20, 5, 5), stats(100, 20, 5, 20));
    let outcome = play_round(&mut engine, Action::Attack, Action::Attack);
    let order: Vec<&str> = outcome.results.iter().map(|r| r.robot.as_str()).collect();
    assert_eq!(order, vec!["Beta", "Alpha"]);
}

#[test]
fn calls_outside_the_battle_are_rejected() {
    let mut engine = BattleEngine::with_roller(
        Robot::new("Alpha", "p1", RobotStats::default()),
        Robot::new("Beta", "p2", RobotStats::default()),
        FixedRoll(0),
        EngineOptions::default(),
    )
    .expect("distinct owners");
    assert_eq!(engine.phase(), BattleStatus::Waiting);
    assert_eq!(engine.submit("p1", Action::Attack), Err(SubmitError::NotInProgress));
    assert_eq!(engine.process_round(), Err(ProcessError::NotStarted));
    assert!(engine.log().is_empty());

    engine.start().expect("starts");
    assert_eq!(engine.start(), Err(StartError::AlreadyStarted));
    assert_eq!(engine.log().len(), 2);
}

#[test]
fn invalid_submissions_are_rejected() {
    let mut engine = fixed_engine(RobotStats::default(), RobotStats::default());
    assert_eq!(
        engine.submit("p3", Action::Attack),
        Err(SubmitError::UnknownOwner("p3".to_string()))
    );
    assert_eq!(
        engine.submit_action("p1", ActionKind::Skill, None, Some(3)),
        Err(SubmitError::InvalidSkill(Some(3)))
    );
    assert_eq!(
        engine.submit_action("p1", ActionKind::Skill, None, None),
        Err(SubmitError::InvalidSkill(None))
    );
    assert!(engine.status().pending.is_empty());
}

#[test]
fn round_waits_for_both_players() {
    let mut engine = fixed_engine(RobotStats::default(), RobotStats::default());
    engine.submit("p1", Action::Attack).expect("accepted");
    assert!(!engine.ready_to_resolve());
    assert_eq!(engine.process_round(), Err(ProcessError::WaitingOnPlayers));
    assert_eq!(engine.current_round(), 1);
    assert_eq!(engine.robot(Seat::B).current_hp(), 100);
    assert_eq!(engine.status().pending, vec!["p1".to_string()]);

    engine.submit("p2", Action::Charge).expect("accepted");
    assert!(engine.ready_to_resolve());
    engine.process_round().expect("resolves");
    assert_eq!(engine.current_round(), 2);
    assert!(engine.status().pending.is_empty());
}

#[test]
fn later_submission_replaces_earlier_one() {
    let mut engine = fixed_engine(RobotStats::default(), RobotStats::default());
    engine.submit("p1", Action::Attack).expect("accepted");
    engine.submit("p1", Action::Charge).expect("accepted");
    engine.submit("p2", Action::Charge).expect("accepted");
    let outcome = engine.process_round().expect("resolves");
    assert_eq!(outcome.results[0].action, ActionKind::Charge);
    assert_eq!(engine.robot(Seat::B).current_hp(), 100);
    assert_eq!(engine.robot(Seat::A).energy(), 30);
}

#[test]
fn defeated_robot_forces_resolution() {
    let mut engine = BattleEngine::with_roller(
        Robot::new("Alpha", "p1", RobotStats::default()),
        Robot::with_overrides(
            "Beta",
            "p2",
            StatOverrides {
                hp: Some(0),
                ..StatOverrides::default()
            },
        ),
        FixedRoll(0),
        EngineOptions::default(),
    )
    .expect("distinct owners");
    engine.start().expect("starts");

    assert_eq!(engine.submit("p2", Action::Attack), Err(SubmitError::ActorDead));
    assert!(engine.ready_to_resolve());
    let outcome = engine.process_round().expect("resolves without submissions");
    assert!(outcome.results.is_empty());
    assert_eq!(outcome.status.status, BattleStatus::Finished);
    assert_eq!(outcome.status.winner.as_deref(), Some("Alpha"));
}

#[test]
fn round_counter_moves_once_per_resolved_round() {
    let mut engine = fixed_engine(RobotStats::default(), RobotStats::default());
    for expected in 1..=4 {
        assert_eq!(engine.current_round(), expected);
        assert!(engine.process_round().is_err());
        assert_eq!(engine.current_round(), expected);
        let outcome = play_round(&mut engine, Action::Charge, Action::Defend);
        assert_eq!(outcome.round, expected);
        assert_eq!(outcome.status.current_round, expected + 1);
    }
}

#[test]
fn owner_id_tie_break_prefers_smaller_id() {
    let mut engine = BattleEngine::with_roller(
        Robot::new("Alpha", "zeta", RobotStats::default()),
        Robot::new("Beta", "alpha", RobotStats::default()),
        FixedRoll(0),
        EngineOptions {
            tie_break: TieBreak::OwnerId,
        },
    )
    .expect("distinct owners");
    engine.start().expect("starts");
    engine.submit("zeta", Action::Attack).expect("accepted");
    engine.submit("alpha", Action::Attack).expect("accepted");
    let outcome = engine.process_round().expect("resolves");
    assert_eq!(outcome.results[0].robot, "Beta");
}

#[test]
fn coin_tie_break_is_seeded() {
    let first_actor = |seed: u64| {
        let mut engine = BattleEngine::with_options(
            Robot::new("Alpha", "p1", RobotStats::default()),
            Robot::new("Beta", "p2", RobotStats::default()),
            seed,
            EngineOptions {
                tie_break: TieBreak::Coin,
            },
        )
        .expect("distinct owners");
        engine.start().expect("starts");
        let outcome = play_round(&mut engine, Action::Charge, Action::Charge);
        outcome.results[0].robot.clone()
    };

    let firsts: Vec<String> = (0..40).map(first_actor).collect();
    let again: Vec<String> = (0..40).map(first_actor).collect();
    assert_eq!(firsts, again);
    assert!(firsts.iter().any(|name| name == "Alpha"));
    assert!(firsts.iter().any(|name| name == "Beta"));
}

#[test]
fn shared_owner_is_rejected() {
    let result = BattleEngine::new(
        Robot::new("Alpha", "same", RobotStats::default()),
        Robot::new("Beta", "same", RobotStats::default()),
        0,
    );
    assert!(matches!(result, Err(EngineError::DuplicateOwner(owner)) if owner == "same"));
}

#[test]
fn log_tracks_rounds() {
    let mut engine = fixed_engine(RobotStats::default(), stats(10, 20, 0, 10));
    let messages: Vec<&str> = engine.log().iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["Battle start!", "Alpha VS Beta"]);

    play_round(&mut engine, Action::Attack, Action::Attack);
    let last_round: Vec<(u32, &str)> = engine
        .log()
        .iter()
        .skip(2)
        .map(|e| (e.round, e.message.as_str()))
        .collect();
    assert_eq!(
        last_round,
        vec![(1, "Alpha attacks Beta for 20 damage"), (1, "Alpha wins!")]
    );
    assert_eq!(engine.battle_log().to_json()["log"].as_array().map(Vec::len), Some(4));
}

#[test]
fn legal_actions_follow_energy() {
    let mut engine = fixed_engine(RobotStats::default(), RobotStats::default());
    assert_eq!(
        engine.legal_actions(Seat::A),
        vec![Action::Attack, Action::Defend, Action::Charge]
    );
    play_round(&mut engine, Action::Charge, Action::Charge);
    let legal = engine.legal_actions(Seat::A);
    assert!(legal.contains(&Action::Skill { index: 0 }));
    assert!(!legal.contains(&Action::Skill { index: 1 }));
}

#[test]
fn status_snapshot_serializes() {
    let engine = fixed_engine(RobotStats::default(), RobotStats::default());
    let json = serde_json::to_value(engine.status()).expect("serializable");
    assert_eq!(json["status"], "in_progress");
    assert_eq!(json["current_round"], 1);
    assert_eq!(json["robots"][1]["name"], "Beta");
    assert!(json["winner"].is_null());
}
