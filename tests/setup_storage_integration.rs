// Integration test for saved setups feeding the diagnostics engine

use trackside::diagnostics::profile::TrackCategory;
use trackside::{
    AnalysisTier, ConfigurationProfile, DiagnosticEngine, DiagnosticRequest, FileBasedStorage,
    SavedSetup, SetupStorage, Symptom, SymptomProfile, TrackContext,
};
use tempfile::TempDir;

fn oval_setup() -> SavedSetup {
    let mut config = ConfigurationProfile::default();
    config.aero.aero_configuration = Some("rear-wing".to_string());
    config.aero.rear_wing_angle = Some("6".to_string());
    config.tires.compound = Some("Semi Slick".to_string());

    SavedSetup {
        name: "Daytona Qualy".to_string(),
        vehicle: Some("GT4".to_string()),
        track_name: Some("Daytona".to_string()),
        track: TrackContext {
            category: TrackCategory::Superspeedway,
            ..Default::default()
        },
        config,
        symptoms: SymptomProfile::from_symptoms([Symptom::WanderingHighSpeed]),
    }
}

#[test]
fn test_saved_setup_diagnoses_like_the_original() {
    let temp_dir = TempDir::new().unwrap();
    let mut storage = FileBasedStorage::new(temp_dir.path().to_path_buf()).unwrap();

    let setup = oval_setup();
    storage.save_setup(&setup).unwrap();

    let loaded = storage.load_setup("daytona qualy").unwrap().unwrap();
    assert_eq!(loaded, setup);

    let engine = DiagnosticEngine::new(AnalysisTier::Premium);
    let request = DiagnosticRequest {
        setup_name: Some(loaded.name.clone()),
        config: loaded.config,
        symptoms: loaded.symptoms,
        track: loaded.track,
        tier: None,
    };
    let report = engine.handle(&request);
    let original = engine.report(&setup.config, &setup.symptoms, &setup.track);

    assert_eq!(report.recommendations, original.recommendations);
    assert_eq!(report.setup_name.as_deref(), Some("Daytona Qualy"));
    assert!(
        report
            .recommendations
            .iter()
            .any(|rec| rec.rule_id == "high-speed-increase-wing")
    );
    assert!(
        report
            .recommendations
            .iter()
            .any(|rec| rec.rule_id == "semi-slick-compression")
    );
}

#[test]
fn test_storage_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    {
        let mut storage = FileBasedStorage::new(temp_dir.path().to_path_buf()).unwrap();
        storage.save_setup(&oval_setup()).unwrap();
        storage
            .save_setup(&SavedSetup::new("Lime Rock", ConfigurationProfile::default()))
            .unwrap();
    }

    let storage = FileBasedStorage::new(temp_dir.path().to_path_buf()).unwrap();
    assert_eq!(
        storage.list_setups().unwrap(),
        vec!["Daytona Qualy".to_string(), "Lime Rock".to_string()]
    );
    assert!(storage.setup_exists("Lime Rock").unwrap());
}
