//! End-to-end battles driven through `BattleSession`.

use raid_core::{
    BattleConfig, BattleEnv, BattleEvent, BattleSession, BossDefinition, Catalog, CharacterId,
    ClassDefinition, DamageSchool, GameState, Mechanic, ModifierKind, OutcomeResult, PcgRng,
    PlayerId, SkillDefinition, SkillRef, TargetMode, resolve_skill,
};

fn catalog() -> Catalog {
    let skills = vec![
        SkillDefinition::new("attack", TargetMode::Enemy, Mechanic::Attack).with_threat(5),
        SkillDefinition::new("rest", TargetMode::SelfOnly, Mechanic::HealByPercent { permille: 75 }),
        SkillDefinition::new("stun", TargetMode::Enemy, Mechanic::Stun { duration: 1 })
            .with_threat(8),
        SkillDefinition::new("smite", TargetMode::AllEnemies, Mechanic::DamageByFactor { percent: 150 })
            .with_school(DamageSchool::Fire),
    ];
    // identical kits, so slot indices do not depend on the dealt class
    let class = |id: &str| ClassDefinition {
        id: id.into(),
        health: 20,
        power: 10,
        skills: vec!["attack".into(), "stun".into(), "smite".into()],
        playable: true,
    };
    let classes = vec![class("berserker"), class("cleric"), class("ranger")];
    let bosses = vec![BossDefinition {
        id: "gargoyle".into(),
        health: 200,
        power: 3,
        basic_attack: "attack".into(),
        recovery: "rest".into(),
        skills: vec![],
    }];
    Catalog::new(skills, classes, bosses).unwrap()
}

fn ids(names: &[&str]) -> Vec<PlayerId> {
    names.iter().map(|n| PlayerId::from(*n)).collect()
}

fn skill_users(events: &[BattleEvent]) -> Vec<CharacterId> {
    events
        .iter()
        .filter(|e| matches!(e, BattleEvent::SkillUsed { .. }))
        .map(|e| e.subject())
        .collect()
}

#[test]
fn scenario_a_attack_trades_damage() {
    let catalog = catalog();
    let config = BattleConfig::default();
    let env = BattleEnv::new(&catalog, &config, &PcgRng);
    let mut state = GameState::setup(env, &ids(&["solo"]), 1, Some("gargoyle")).unwrap();
    assert_eq!(state.enemy.base.current_health, 200);
    let player = &state.players[0].base;
    assert_eq!((player.health, player.power), (20, 10));

    // The resolution pass alone: exactly two damage events.
    let mut probe = state.clone();
    resolve_skill(
        &mut probe,
        &catalog,
        CharacterId::Player(0),
        SkillRef::Slot(0),
        &[CharacterId::Enemy],
    )
    .unwrap();
    let damage: Vec<_> = probe
        .events
        .iter()
        .filter_map(|e| match *e {
            BattleEvent::Damage { target, value, .. } => Some((target, value)),
            _ => None,
        })
        .collect();
    assert_eq!(damage, vec![(CharacterId::Enemy, 10), (CharacterId::Player(0), 3)]);
    assert_eq!(probe.enemy.base.current_health, 190);
    assert_eq!(probe.players[0].base.current_health, 17);

    // The same action through the session, followed by the enemy's reaction.
    let report = BattleSession::new(&mut state)
        .use_skill(env, &"solo".into(), 0, 0)
        .unwrap();
    assert_eq!(report.events[..3], probe.events[..]);
    assert_eq!(skill_users(&report.events), vec![CharacterId::Player(0), CharacterId::Enemy]);
    assert_eq!(state.enemy.base.current_health, 180);
    assert_eq!(state.players[0].base.current_health, 14);
}

#[test]
fn scenario_b_stun_costs_exactly_one_turn() {
    let catalog = catalog();
    let config = BattleConfig::default();
    let env = BattleEnv::new(&catalog, &config, &PcgRng);
    let mut state = GameState::setup(env, &ids(&["solo"]), 1, Some("gargoyle")).unwrap();
    state.players[0].base.effects.stunned = 1;
    state.players[0].base.effects.poison = 2;
    let threat_before = state.players[0].threat;

    let mut session = BattleSession::new(&mut state);
    let report = session.use_skill(env, &"solo".into(), 0, 0).unwrap();

    // no skill event or threat from the stunned player, but it still ticks
    assert_eq!(skill_users(&report.events), vec![CharacterId::Enemy]);
    assert!(report.events.iter().any(|e| matches!(
        e,
        BattleEvent::Damage { target: CharacterId::Player(0), school: DamageSchool::Poison, .. }
    )));
    let player = &session.state().players[0];
    assert_eq!(player.threat, threat_before);
    assert_eq!(player.base.effects.stunned, 0);

    let report = session.use_skill(env, &"solo".into(), 0, 0).unwrap();
    assert_eq!(skill_users(&report.events), vec![CharacterId::Player(0), CharacterId::Enemy]);
    assert_eq!(session.state().players[0].threat, 5);
}

#[test]
fn scenario_b_stunned_enemy_skips_one_reaction() {
    let catalog = catalog();
    let config = BattleConfig::default();
    let env = BattleEnv::new(&catalog, &config, &PcgRng);
    let mut state = GameState::setup(env, &ids(&["solo"]), 1, Some("gargoyle")).unwrap();

    let mut session = BattleSession::new(&mut state);
    let report = session.use_skill(env, &"solo".into(), 1, 0).unwrap();
    assert_eq!(skill_users(&report.events), vec![CharacterId::Player(0)]);
    assert!(report.events.iter().any(|e| matches!(
        e,
        BattleEvent::Modifier { target: CharacterId::Enemy, kind: ModifierKind::Stun, value: 1 }
    )));
    assert_eq!(session.state().enemy.base.effects.stunned, 0);

    let report = session.use_skill(env, &"solo".into(), 0, 0).unwrap();
    assert_eq!(skill_users(&report.events), vec![CharacterId::Player(0), CharacterId::Enemy]);
}

#[test]
fn scenario_c_leaving_on_own_turn_hands_the_turn_on() {
    let catalog = catalog();
    let config = BattleConfig::default();
    let env = BattleEnv::new(&catalog, &config, &PcgRng);
    let mut state = GameState::setup(env, &ids(&["a", "b", "c"]), 5, Some("gargoyle")).unwrap();
    assert_eq!(state.enemy.base.health, 400);
    state.enemy.base.current_health = 350;
    state.current_turn = 1;
    state.players[2].base.effects.poison = 1;

    let mut session = BattleSession::new(&mut state);
    let report = session.player_left(env, &"b".into()).unwrap();
    assert!(report.outcome.is_none());

    let state = session.state();
    assert_eq!(state.players.len(), 2);
    for (slot, player) in state.players.iter().enumerate() {
        assert_eq!(player.base.id, CharacterId::Player(slot));
    }
    assert_eq!(state.players[1].player_id, PlayerId::from("c"));
    assert_eq!(state.enemy.base.health, 300);
    assert_eq!(state.enemy.base.current_health, 300);
    // end-of-turn ticking ran on the leaver's behalf
    assert_eq!(report.events.len(), 1);
    assert_eq!(state.players[1].base.current_health, 19);
    // c inherited b's place in the rotation
    assert_eq!(state.current_turn, 1);
    assert_eq!(state.turns, 1);
    assert_eq!(state.class_pool.len(), 1);

    session.use_skill(env, &"c".into(), 0, 0).unwrap();
    assert_eq!(session.state().current_turn, 0);
}

#[test]
fn leaving_last_slot_on_turn_wraps_to_the_front() {
    let catalog = catalog();
    let config = BattleConfig::default();
    let env = BattleEnv::new(&catalog, &config, &PcgRng);
    let mut state = GameState::setup(env, &ids(&["a", "b"]), 5, Some("gargoyle")).unwrap();
    state.current_turn = 1;

    let mut session = BattleSession::new(&mut state);
    session.player_left(env, &"b".into()).unwrap();
    assert_eq!(session.state().current_turn, 0);
    assert_eq!(session.state().players.len(), 1);
}

#[test]
fn area_damage_hits_the_boss_with_its_school() {
    let catalog = catalog();
    let config = BattleConfig::default();
    let env = BattleEnv::new(&catalog, &config, &PcgRng);
    let mut state = GameState::setup(env, &ids(&["solo"]), 1, Some("gargoyle")).unwrap();

    let report = BattleSession::new(&mut state)
        .use_skill(env, &"solo".into(), 2, 0)
        .unwrap();
    assert!(matches!(
        report.events[1],
        BattleEvent::Damage { target: CharacterId::Enemy, value: 15, school: DamageSchool::Fire, .. }
    ));
}

#[test]
fn party_wipe_is_lost_for_everyone() {
    let catalog = catalog();
    let config = BattleConfig::default();
    let env = BattleEnv::new(&catalog, &config, &PcgRng);
    let mut state = GameState::setup(env, &ids(&["a", "b"]), 9, Some("gargoyle")).unwrap();
    state.players[1].kill();
    state.players[0].base.current_health = 2;
    state.enemy_target = 0;

    let report = BattleSession::new(&mut state)
        .use_skill(env, &"a".into(), 0, 0)
        .unwrap();

    let outcome = report.outcome.unwrap();
    assert_eq!(outcome.result, OutcomeResult::Lost);
    assert_eq!(outcome.players.len(), 2);
    assert!(outcome.players.values().all(|r| *r == OutcomeResult::Lost));
}

#[test]
fn identical_inputs_replay_identically() {
    let catalog = catalog();
    let config = BattleConfig::default();
    let env = BattleEnv::new(&catalog, &config, &PcgRng);

    let run = || {
        let mut state = GameState::setup(env, &ids(&["a", "b", "c"]), 42, None).unwrap();
        let mut session = BattleSession::new(&mut state);
        let mut log = Vec::new();
        for _ in 0..12 {
            let turn = session.state().current_turn;
            let player = session.state().players[turn].player_id.clone();
            match session.use_skill(env, &player, 0, 0) {
                Ok(report) => log.extend(report.events),
                Err(_) => break,
            }
        }
        (state, log)
    };

    assert_eq!(run(), run());
}
