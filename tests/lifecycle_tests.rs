//! Lifecycle integration tests.
//!
//! Drive the orchestrator the way a host would: commands and world events
//! in, notices out, with the sim host standing in for the game world and
//! the optional plugins.

use raidme::sim::SimHost;
use raidme::{
    Notice, PlayerId, Position, WorldEvent, ZoneLifecycle, ZoneService, ZoneSettings,
    PERMISSION_ADMIN, PERMISSION_USE,
};

const ALICE: PlayerId = PlayerId::new(1);
const BOB: PlayerId = PlayerId::new(2);
const ADMIN: PlayerId = PlayerId::new(99);

const ALICE_ZONE: &str = "RaidMe_1";
const BOB_ZONE: &str = "RaidMe_2";

/// Host with Alice permitted, connected, and standing next to her anchor.
fn host_with_alice() -> SimHost {
    let mut host = SimHost::new();
    host.perms.grant(ALICE, PERMISSION_USE);
    host.world.place_actor(ALICE, Position::new(0.0, 0.0, 0.0));
    host.world.add_anchor(ALICE, Position::new(2.0, 0.0, 0.0));
    host
}

fn create_alice_zone(host: &mut SimHost, lifecycle: &mut ZoneLifecycle) {
    let notices = lifecycle.player_command(&mut host.externals(), ALICE, &["start"], 0.0);
    assert_eq!(notices, vec![Notice::new(ALICE, "PvP zone created around your TC.")]);
}

#[test]
fn test_create_registers_zone_with_clamped_radius() {
    let mut host = host_with_alice();
    let mut lifecycle = ZoneLifecycle::new(ZoneSettings::default());

    create_alice_zone(&mut host, &mut lifecycle);

    // base=40, min=30, max=80, mult=1.0 -> effective radius 40
    let attributes = host.zones.attributes(ALICE_ZONE).unwrap();
    assert_eq!(attributes.radius, 40.0);
    assert_eq!(attributes.name, "RaidMeZone_1");
    assert_eq!(host.rules.rule_for(ALICE_ZONE), Some("exclude".to_string()));
    assert_eq!(host.world.marker_count(), 1);
}

#[test]
fn test_second_create_rejected_with_already_has_zone() {
    let mut host = host_with_alice();
    let mut lifecycle = ZoneLifecycle::new(ZoneSettings::default());
    create_alice_zone(&mut host, &mut lifecycle);

    let notices = lifecycle.player_command(&mut host.externals(), ALICE, &["start"], 0.0);
    assert!(notices[0].text.starts_with("You already have a PvP zone"));
    assert_eq!(lifecycle.registry().len(), 1);
}

#[test]
fn test_foreign_anchor_inside_exclusion_radius_blocks_creation() {
    let mut host = host_with_alice();
    // Bob's anchor 60 units from Alice's, inside the 100-unit exclusion radius.
    host.world.add_anchor(BOB, Position::new(62.0, 0.0, 0.0));
    let mut lifecycle = ZoneLifecycle::new(ZoneSettings::default());

    let notices = lifecycle.player_command(&mut host.externals(), ALICE, &["start"], 0.0);
    assert!(notices[0].text.contains("too close to your base"));
    assert!(lifecycle.registry().is_empty());
    assert!(!host.zones.has_zone(ALICE_ZONE));
}

#[test]
fn test_removal_is_scheduled_then_fires() {
    let mut host = host_with_alice();
    let mut lifecycle = ZoneLifecycle::new(ZoneSettings::default());
    create_alice_zone(&mut host, &mut lifecycle);
    host.zones.set_inside(ALICE_ZONE, ALICE, true);

    let notices = lifecycle.player_command(&mut host.externals(), ALICE, &["remove"], 0.0);
    assert_eq!(
        notices[0].text,
        "PvP zone will be removed from your TC after 180 seconds."
    );
    assert!(lifecycle.scheduler().is_pending(ALICE));

    // Not due yet.
    assert!(lifecycle.tick(&mut host.externals(), 179.0).is_empty());
    assert!(lifecycle.registry().contains_owner(ALICE));

    let notices = lifecycle.tick(&mut host.externals(), 180.0);
    assert_eq!(notices, vec![Notice::new(ALICE, "PvP zone removed.")]);
    assert!(lifecycle.registry().is_empty());
    assert!(!host.zones.has_zone(ALICE_ZONE));
    assert_eq!(host.world.marker_count(), 0);
}

#[test]
fn test_removal_requires_standing_inside_own_zone() {
    let mut host = host_with_alice();
    let mut lifecycle = ZoneLifecycle::new(ZoneSettings::default());
    create_alice_zone(&mut host, &mut lifecycle);
    // Alice is outside her zone.

    let notices = lifecycle.player_command(&mut host.externals(), ALICE, &["remove"], 0.0);
    assert_eq!(
        notices[0].text,
        "You are not in the PvP zone. You cannot remove it."
    );
    assert!(!lifecycle.scheduler().is_pending(ALICE));
}

#[test]
fn test_removal_without_zone_reports_no_zone_owned() {
    let mut host = host_with_alice();
    let mut lifecycle = ZoneLifecycle::new(ZoneSettings::default());

    let notices = lifecycle.player_command(&mut host.externals(), ALICE, &["remove"], 0.0);
    assert_eq!(notices[0].text, "You do not have a PvP zone around a TC.");
}

#[test]
fn test_cancel_without_pending_removal() {
    let mut host = host_with_alice();
    let mut lifecycle = ZoneLifecycle::new(ZoneSettings::default());

    let notices = lifecycle.player_command(&mut host.externals(), ALICE, &["cancel"], 0.0);
    assert_eq!(notices[0].text, "You do not have a removal timer active.");
}

#[test]
fn test_rescheduling_replaces_the_timer() {
    let mut host = host_with_alice();
    let mut lifecycle = ZoneLifecycle::new(ZoneSettings::default());
    create_alice_zone(&mut host, &mut lifecycle);
    host.zones.set_inside(ALICE_ZONE, ALICE, true);

    lifecycle.player_command(&mut host.externals(), ALICE, &["remove"], 0.0);
    lifecycle.player_command(&mut host.externals(), ALICE, &["remove"], 100.0);
    assert_eq!(lifecycle.scheduler().len(), 1);

    // Old deadline (t=180) must not fire; the later one (t=280) wins.
    assert!(lifecycle.tick(&mut host.externals(), 180.0).is_empty());
    assert!(lifecycle.registry().contains_owner(ALICE));
    assert!(!lifecycle.tick(&mut host.externals(), 280.0).is_empty());
    assert!(lifecycle.registry().is_empty());
}

#[test]
fn test_attack_cancels_pending_removal() {
    let mut host = host_with_alice();
    let mut lifecycle = ZoneLifecycle::new(ZoneSettings::default());
    create_alice_zone(&mut host, &mut lifecycle);
    host.zones.set_inside(ALICE_ZONE, ALICE, true);
    lifecycle.player_command(&mut host.externals(), ALICE, &["remove"], 0.0);

    // Attacked 10 seconds later.
    let notices = lifecycle.handle_event(
        &mut host.externals(),
        WorldEvent::PlayerAttacked {
            attacker: ALICE,
            victim: None,
        },
    );
    assert_eq!(
        notices[0].text,
        "You attacked something. The removal timer has been cancelled."
    );

    // The zone persists past the original deadline.
    assert!(lifecycle.tick(&mut host.externals(), 500.0).is_empty());
    assert!(lifecycle.registry().contains_owner(ALICE));
}

#[test]
fn test_being_attacked_cancels_victims_removal() {
    let mut host = host_with_alice();
    let mut lifecycle = ZoneLifecycle::new(ZoneSettings::default());
    create_alice_zone(&mut host, &mut lifecycle);
    host.zones.set_inside(ALICE_ZONE, ALICE, true);
    lifecycle.player_command(&mut host.externals(), ALICE, &["remove"], 0.0);

    let notices = lifecycle.handle_event(
        &mut host.externals(),
        WorldEvent::PlayerAttacked {
            attacker: BOB,
            victim: Some(ALICE),
        },
    );
    assert_eq!(
        notices[0].text,
        "You were attacked by a player. The removal timer has been cancelled."
    );
    assert!(!lifecycle.scheduler().is_pending(ALICE));
}

#[test]
fn test_cancellation_and_fire_are_ordered_by_the_loop() {
    // Cancel processed before the fire tick: removal prevented.
    let mut host = host_with_alice();
    let mut lifecycle = ZoneLifecycle::new(ZoneSettings::default());
    create_alice_zone(&mut host, &mut lifecycle);
    host.zones.set_inside(ALICE_ZONE, ALICE, true);
    lifecycle.player_command(&mut host.externals(), ALICE, &["remove"], 0.0);

    lifecycle.handle_event(
        &mut host.externals(),
        WorldEvent::PlayerAttacked {
            attacker: ALICE,
            victim: None,
        },
    );
    assert!(lifecycle.tick(&mut host.externals(), 180.0).is_empty());
    assert!(lifecycle.registry().contains_owner(ALICE));

    // Fire tick processed first: removal proceeds, later cancel is a no-op.
    let mut host = host_with_alice();
    let mut lifecycle = ZoneLifecycle::new(ZoneSettings::default());
    create_alice_zone(&mut host, &mut lifecycle);
    host.zones.set_inside(ALICE_ZONE, ALICE, true);
    lifecycle.player_command(&mut host.externals(), ALICE, &["remove"], 0.0);

    assert!(!lifecycle.tick(&mut host.externals(), 180.0).is_empty());
    let notices = lifecycle.handle_event(
        &mut host.externals(),
        WorldEvent::PlayerAttacked {
            attacker: ALICE,
            victim: None,
        },
    );
    assert!(notices.is_empty());
    assert!(lifecycle.registry().is_empty());
}

#[test]
fn test_leaving_own_zone_cancels_removal() {
    let mut host = host_with_alice();
    let mut lifecycle = ZoneLifecycle::new(ZoneSettings::default());
    create_alice_zone(&mut host, &mut lifecycle);
    host.zones.set_inside(ALICE_ZONE, ALICE, true);
    lifecycle.player_command(&mut host.externals(), ALICE, &["remove"], 0.0);

    // Leaving somebody else's zone doesn't count.
    let notices = lifecycle.handle_event(
        &mut host.externals(),
        WorldEvent::ZoneExited {
            zone_id: BOB_ZONE.to_string(),
            player: ALICE,
        },
    );
    assert!(notices.is_empty());
    assert!(lifecycle.scheduler().is_pending(ALICE));

    let notices = lifecycle.handle_event(
        &mut host.externals(),
        WorldEvent::ZoneExited {
            zone_id: ALICE_ZONE.to_string(),
            player: ALICE,
        },
    );
    assert_eq!(
        notices[0].text,
        "You left your PvP zone. The removal timer has been cancelled."
    );
    assert!(!lifecycle.scheduler().is_pending(ALICE));
}

#[test]
fn test_anchor_destruction_removes_zone_and_marker() {
    let mut host = SimHost::new();
    host.perms.grant(ALICE, PERMISSION_USE);
    host.world.place_actor(ALICE, Position::new(0.0, 0.0, 0.0));
    let anchor = host.world.add_anchor(ALICE, Position::new(2.0, 0.0, 0.0));
    let mut lifecycle = ZoneLifecycle::new(ZoneSettings::default());
    create_alice_zone(&mut host, &mut lifecycle);

    host.world.destroy(anchor);
    lifecycle.handle_event(&mut host.externals(), WorldEvent::EntityDestroyed { entity: anchor });

    assert!(lifecycle.registry().is_empty());
    assert!(!host.zones.has_zone(ALICE_ZONE));
    assert_eq!(host.world.marker_count(), 0);
}

#[test]
fn test_destruction_of_unrelated_entity_is_ignored() {
    let mut host = host_with_alice();
    let mut lifecycle = ZoneLifecycle::new(ZoneSettings::default());
    create_alice_zone(&mut host, &mut lifecycle);

    let unrelated = host.world.add_anchor(BOB, Position::new(900.0, 0.0, 0.0));
    host.world.destroy(unrelated);
    lifecycle.handle_event(
        &mut host.externals(),
        WorldEvent::EntityDestroyed { entity: unrelated },
    );

    assert!(lifecycle.registry().contains_owner(ALICE));
}

#[test]
fn test_admin_remove_picks_lowest_owner_when_zones_overlap() {
    let mut host = SimHost::new();
    host.perms.grant(ADMIN, PERMISSION_ADMIN);
    for (owner, x) in [(ALICE, 0.0), (BOB, 500.0)] {
        host.perms.grant(owner, PERMISSION_USE);
        host.world.place_actor(owner, Position::new(x, 0.0, 0.0));
        host.world.add_anchor(owner, Position::new(x + 2.0, 0.0, 0.0));
    }
    let mut lifecycle = ZoneLifecycle::new(ZoneSettings::default());
    lifecycle.player_command(&mut host.externals(), ALICE, &["start"], 0.0);
    lifecycle.player_command(&mut host.externals(), BOB, &["start"], 0.0);

    // Admin stands in both zones at once.
    host.zones.set_inside(ALICE_ZONE, ADMIN, true);
    host.zones.set_inside(BOB_ZONE, ADMIN, true);

    let notices = lifecycle.admin_command(&mut host.externals(), ADMIN, &["remove"]);
    assert_eq!(notices, vec![Notice::new(ADMIN, "PvP zone removed.")]);
    assert!(!lifecycle.registry().contains_owner(ALICE));
    assert!(lifecycle.registry().contains_owner(BOB));

    lifecycle.admin_command(&mut host.externals(), ADMIN, &["remove"]);
    assert!(lifecycle.registry().is_empty());
}

#[test]
fn test_admin_remove_outside_every_zone() {
    let mut host = host_with_alice();
    host.perms.grant(ADMIN, PERMISSION_ADMIN);
    let mut lifecycle = ZoneLifecycle::new(ZoneSettings::default());
    create_alice_zone(&mut host, &mut lifecycle);

    let notices = lifecycle.admin_command(&mut host.externals(), ADMIN, &["remove"]);
    assert_eq!(notices[0].text, "No matching zone found for your location.");
    assert!(lifecycle.registry().contains_owner(ALICE));
}

#[test]
fn test_admin_wipe_removes_everything_and_cancels_timers() {
    let mut host = SimHost::new();
    host.perms.grant(ADMIN, PERMISSION_ADMIN);
    for (owner, x) in [(ALICE, 0.0), (BOB, 500.0)] {
        host.perms.grant(owner, PERMISSION_USE);
        host.world.place_actor(owner, Position::new(x, 0.0, 0.0));
        host.world.add_anchor(owner, Position::new(x + 2.0, 0.0, 0.0));
    }
    let mut lifecycle = ZoneLifecycle::new(ZoneSettings::default());
    lifecycle.player_command(&mut host.externals(), ALICE, &["start"], 0.0);
    lifecycle.player_command(&mut host.externals(), BOB, &["start"], 0.0);
    host.zones.set_inside(ALICE_ZONE, ALICE, true);
    lifecycle.player_command(&mut host.externals(), ALICE, &["remove"], 0.0);

    let notices = lifecycle.admin_command(&mut host.externals(), ADMIN, &["wipe"]);
    assert_eq!(notices, vec![Notice::new(ADMIN, "All PvP zones removed.")]);
    assert!(lifecycle.registry().is_empty());
    assert!(lifecycle.scheduler().is_empty());
    assert!(host.zones.zone_ids().is_empty());
    assert_eq!(host.world.marker_count(), 0);
}

#[test]
fn test_admin_commands_require_admin_permission() {
    let mut host = host_with_alice();
    let mut lifecycle = ZoneLifecycle::new(ZoneSettings::default());

    let notices = lifecycle.admin_command(&mut host.externals(), ALICE, &["wipe"]);
    assert_eq!(notices[0].text, "You do not have permission to use this command.");
}

#[test]
fn test_absent_plugins_degrade_to_noops() {
    let mut host = host_with_alice();
    host.zones_loaded = false;
    host.rules_loaded = false;
    let mut lifecycle = ZoneLifecycle::new(ZoneSettings::default());

    // Creation still succeeds locally.
    create_alice_zone(&mut host, &mut lifecycle);
    assert!(lifecycle.registry().contains_owner(ALICE));
    assert!(!host.zones.has_zone(ALICE_ZONE));
    assert_eq!(host.rules.rule_for(ALICE_ZONE), None);

    // With no zone service, occupancy reads false and removal is rejected.
    let notices = lifecycle.player_command(&mut host.externals(), ALICE, &["remove"], 0.0);
    assert_eq!(
        notices[0].text,
        "You are not in the PvP zone. You cannot remove it."
    );
}

#[test]
fn test_save_checkpoint_persists() {
    let mut host = host_with_alice();
    let mut lifecycle = ZoneLifecycle::new(ZoneSettings::default());
    create_alice_zone(&mut host, &mut lifecycle);

    lifecycle.handle_event(&mut host.externals(), WorldEvent::SaveCheckpoint);
    assert!(host.store.contains(raidme::DATA_FILE_NAME));
}

#[test]
fn test_shutdown_cancels_timers_kills_markers_and_persists() {
    let mut host = host_with_alice();
    let mut lifecycle = ZoneLifecycle::new(ZoneSettings::default());
    create_alice_zone(&mut host, &mut lifecycle);
    host.zones.set_inside(ALICE_ZONE, ALICE, true);
    lifecycle.player_command(&mut host.externals(), ALICE, &["remove"], 0.0);

    lifecycle.handle_event(&mut host.externals(), WorldEvent::Shutdown);

    assert!(lifecycle.scheduler().is_empty());
    assert_eq!(host.world.marker_count(), 0);
    assert!(host.store.contains(raidme::DATA_FILE_NAME));
    // Records survive shutdown; only entities and timers are torn down.
    assert!(lifecycle.registry().contains_owner(ALICE));
}
