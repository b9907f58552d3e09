use lifetime_traffic_core::{FrameIndex, PopulationSnapshot};
use lifetime_traffic_system_admission::{
    maybe_admit, AdmitDecision, Admission, Config, HoldReason, DEFAULT_POPULATION_CAP,
    DEFAULT_SPAWN_PERIOD,
};

#[test]
fn default_cadence_admits_fifty_occupants_on_period_boundaries() {
    let mut admitted = 0_u32;
    let mut admitted_frames = Vec::new();

    for frame in 0..2500_u64 {
        let decision = maybe_admit(
            FrameIndex::new(frame),
            admitted as usize,
            admitted,
            DEFAULT_POPULATION_CAP,
            DEFAULT_SPAWN_PERIOD,
        );
        if decision.is_admit() {
            admitted += 1;
            admitted_frames.push(frame);
        }
    }

    assert_eq!(admitted, 50);
    let expected: Vec<u64> = (0..50).map(|index| index * 50).collect();
    assert_eq!(admitted_frames, expected);
    assert_eq!(admitted_frames.last(), Some(&2450));
}

#[test]
fn cap_stops_admissions_even_when_population_drained() {
    let admission = Admission::new(Config::new(1, 3));
    let mut population = PopulationSnapshot::default();
    let mut decisions = Vec::new();

    for frame in 0..6 {
        let decision = admission.decide(FrameIndex::new(frame), population);
        if decision.is_admit() {
            population.admitted += 1;
        }
        population.active = 0;
        decisions.push(decision);
    }

    assert_eq!(
        decisions,
        vec![
            AdmitDecision::Admit,
            AdmitDecision::Admit,
            AdmitDecision::Admit,
            AdmitDecision::Hold(HoldReason::CapReached),
            AdmitDecision::Hold(HoldReason::CapReached),
            AdmitDecision::Hold(HoldReason::CapReached),
        ]
    );
}

#[test]
fn off_cadence_frames_are_held() {
    let admission = Admission::default();
    let population = PopulationSnapshot::default();

    assert!(admission.decide(FrameIndex::ZERO, population).is_admit());
    assert_eq!(
        admission.decide(FrameIndex::new(49), population),
        AdmitDecision::Hold(HoldReason::OffCadence)
    );
    assert!(admission.decide(FrameIndex::new(100), population).is_admit());
}

#[test]
fn default_config_matches_reference_constants() {
    let config = Config::default();
    assert_eq!(config.spawn_period(), 50);
    assert_eq!(config.population_cap(), 50);
}
