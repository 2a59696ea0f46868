// seeker_core/tests/scenarios.rs

use nalgebra::Point2;
use seeker_core::prelude::*;

const DT: f64 = 1.0 / 60.0;

fn seeker_at(x: f64, z: f64) -> Seeker {
    Seeker::new(
        SeekerParams::default(),
        MazeLayout::default(),
        AgentPose::new(x, z, 0.0),
    )
    .expect("default params are valid")
}

#[test]
fn scanning_without_a_target_turns_into_exploration() {
    let mut seeker = seeker_at(5.0, 10.0);
    let scan = TickInput {
        command: NavigationCommand::Scan,
        ..Default::default()
    };

    let mut ticks = 0;
    while seeker.mode().kind() != ModeKind::Exploring {
        seeker.tick(&scan, DT);
        ticks += 1;
        assert!(ticks < 60 * 60, "never started exploring");
    }
    assert_eq!(seeker.rotation().total, 0.0);

    // Forward for three seconds, then a left turn, then forward again.
    let commands: Vec<NavigationCommand> = (0..300)
        .map(|_| seeker.tick(&scan, DT).effective_command)
        .collect();
    assert!(commands[..170].iter().all(|c| *c == NavigationCommand::Forward));
    let turn_start = commands
        .iter()
        .position(|c| *c == NavigationCommand::Left)
        .expect("no turn phase");
    assert!((175..=185).contains(&turn_start));
    let turn_len = commands[turn_start..]
        .iter()
        .take_while(|c| **c == NavigationCommand::Left)
        .count();
    assert!((68..=76).contains(&turn_len), "turn lasted {turn_len} ticks");

    // A target ends exploration on the next tick.
    let report = seeker.tick(
        &TickInput {
            target: Some(Point2::new(-5.0, -10.0)),
            ..scan
        },
        DT,
    );
    assert_eq!(
        report.transitions,
        vec![Transition::ToReactive(ReactiveReason::TargetAssigned)]
    );
    assert_eq!(report.mode, ModeKind::Reactive);
}

#[test]
fn pathfinding_crosses_from_north_to_south_through_the_gap() {
    let layout = MazeLayout::default();
    let mut seeker = seeker_at(-8.0, -12.0);
    let input = TickInput {
        command: NavigationCommand::Scan,
        target: Some(Point2::new(5.0, 10.0)),
        ..Default::default()
    };

    let mut last_scan = 0.0;
    let mut started = false;
    let mut crossings = Vec::new();
    let mut previous = seeker.pose().ground();

    for _ in 0..60 * 90 {
        let report = seeker.tick(&input, DT);
        assert!(!report.collided, "hit {:?} at {:?}", report.contact, report.pose);

        if !started {
            // Monotone while scanning, until the switch.
            assert!(seeker.rotation().scan >= last_scan);
            last_scan = seeker.rotation().scan;
        }
        if report.transitions.contains(&Transition::StartPathfinding) {
            started = true;
        }

        let here = report.pose.ground();
        if previous.y.signum() != here.y.signum() && here.y != 0.0 && previous.y != 0.0 {
            crossings.push(here.x);
        }
        previous = here;

        if report
            .transitions
            .contains(&Transition::ToReactive(ReactiveReason::PathComplete))
        {
            assert!(started);
            assert_eq!(crossings.len(), 1, "crossed at {crossings:?}");
            assert!(layout.in_gap_band(crossings[0]));
            assert_eq!(MazeHalf::of(&here), MazeHalf::South);
            // Reset on completion; at most one tick of scanning since.
            assert!(seeker.rotation().scan < 0.05);
            return;
        }
    }
    panic!("pathfinding never completed");
}

#[test]
fn stop_brings_the_agent_to_rest() {
    let mut seeker = seeker_at(5.0, 15.0);
    let target = Some(Point2::new(5.0, 5.0));
    for _ in 0..60 {
        seeker.tick(
            &TickInput {
                command: NavigationCommand::Forward,
                target,
                target_visible: true,
                ..Default::default()
            },
            DT,
        );
    }
    assert!(seeker.kinematics().velocity > 0.0);

    let mut speeds = Vec::new();
    for _ in 0..240 {
        let report = seeker.tick(
            &TickInput {
                command: NavigationCommand::Stop,
                target,
                target_visible: true,
                ..Default::default()
            },
            DT,
        );
        speeds.push(report.kinematics.velocity);
    }
    assert!(speeds.windows(2).all(|w| w[1] <= w[0]));
    assert_eq!(*speeds.last().unwrap(), 0.0);
}

#[test]
fn mission_walks_its_targets_in_order() {
    let vocabulary: Vec<String> = ["Red Cube", "Pink Sphere", "Green Cone"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let planned = plan_mission(None, "first the cone, then the cube", &vocabulary).unwrap();
    let mut plan = MissionPlan::new(planned.targets, 0.8).unwrap();
    assert_eq!(plan.start(), Some("Green Cone"));

    let confirm = VisionResponse {
        action: NavigationCommand::Stop,
        target_visible: true,
        confidence: 0.9,
        ..VisionResponse::fallback("")
    };
    assert!(matches!(plan.report(&confirm), MissionEvent::Advanced { .. }));
    assert_eq!(plan.current_target(), Some("Red Cube"));
    assert!(matches!(plan.report(&confirm), MissionEvent::Completed { .. }));
    assert_eq!(plan.status(), MissionStatus::Completed);
}
