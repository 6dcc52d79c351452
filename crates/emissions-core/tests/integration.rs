//! Integration tests for emissions-core.
//!
//! These tests drive the public API from dataset loading to highlights.

use emissions_core::{
    apply, arg_extreme, format_magnitude, group_sum, percentage, pivot_mean, top_per_group,
    AggregateError, ConfigError, DashboardConfig, Dataset, Dimension, ExtremeMode, FilterCriteria,
    FilterSpec, Key, Measure, Record, RecordStore, StoreError, Summary, SHARE, TOTAL_EMISSION,
};

const DATASET_JSON: &str = r#"[
  {"Estado": "SP", "lat": -23.5, "long": -46.6, "Ano": 2019, "Setor de emissão": "Energia", "Gás": "CO2", "Emissão": 1200000.0},
  {"Estado": "SP", "lat": -23.5, "long": -46.6, "Ano": 2020, "Setor de emissão": "Energia", "Gás": "CO2", "Emissão": 1300000.0},
  {"Estado": "MG", "lat": -18.5, "long": -44.6, "Ano": 2019, "Setor de emissão": "Agropecuária", "Gás": "CH4", "Emissão": 900000.0},
  {"Estado": "MG", "lat": -18.5, "long": -44.6, "Ano": 2020, "Setor de emissão": "Agropecuária", "Gás": "CH4", "Emissão": 950000.0},
  {"Estado": "RS", "lat": -30.0, "long": -53.0, "Ano": 2019, "Setor de emissão": "Agropecuária", "Gás": "N2O", "Emissão": 300000.0},
  {"Estado": "RS", "lat": -30.0, "long": -53.0, "Ano": 2020, "Setor de emissão": "Energia", "Gás": "CO2", "Emissão": 400000.0},
  {"Estado": "AM", "lat": -3.4, "long": -65.0, "Ano": 2020, "Setor de emissão": "Mudança de Uso da Terra e Floresta", "Gás": "CO2", "Emissão": 5000000.0}
]"#;

fn dataset() -> Dataset {
    Dataset::from_json(DATASET_JSON).expect("valid dataset")
}

// =============================================================================
// End-to-end examples
// =============================================================================

#[test]
fn test_duplicate_records_rejected_upstream() {
    let result = Dataset::new(vec![
        Record::new("SP", (0.0, 0.0), 2020, "Energy", "CO2", 100.0),
        Record::new("SP", (0.0, 0.0), 2020, "Energy", "CO2", 50.0),
    ]);
    assert!(matches!(result, Err(StoreError::DuplicateKey { .. })));
}

#[test]
fn test_two_state_example() {
    let ds = Dataset::new(vec![
        Record::new("SP", (0.0, 0.0), 2020, "Energy", "CO2", 100.0),
        Record::new("MG", (0.0, 0.0), 2020, "Agro", "CH4", 200.0),
    ])
    .expect("unique keys");
    let working = apply(ds.all_records(), &FilterCriteria::full(&ds.vocabulary()));

    let totals = group_sum(&working, Dimension::State);
    assert_eq!(totals.value(&Key::from("SP"), TOTAL_EMISSION), Some(100.0));
    assert_eq!(totals.value(&Key::from("MG"), TOTAL_EMISSION), Some(200.0));

    let max = arg_extreme(&totals, TOTAL_EMISSION, ExtremeMode::Max).expect("non-empty");
    assert_eq!(max.label(), "MG");
    assert_eq!(format_magnitude(max.value).expect("in domain"), "200");
}

#[test]
fn test_pivot_example() {
    let data = vec![
        Record::new("SP", (0.0, 0.0), 2019, "Energy", "CO2", 10.0),
        Record::new("SP", (0.0, 0.0), 2019, "Energy", "CH4", 20.0),
        Record::new("SP", (0.0, 0.0), 2020, "Energy", "CO2", 30.0),
    ];
    let working: Vec<&Record> = data.iter().collect();
    let pivot = pivot_mean(&working, Dimension::Year, Dimension::Gas, Measure::Emission);

    assert_eq!(pivot.value(&Key::Year(2019), "CO2"), Some(10.0));
    assert_eq!(pivot.value(&Key::Year(2019), "CH4"), Some(20.0));
    assert_eq!(pivot.value(&Key::Year(2020), "CO2"), Some(30.0));
    assert_eq!(pivot.value(&Key::Year(2020), "CH4"), None);
}

// =============================================================================
// Dataset + filter pipeline
// =============================================================================

#[test]
fn test_region_filter_pipeline() {
    let ds = dataset();
    let spec = FilterSpec {
        region: Some("Sudeste".to_string()),
        ..FilterSpec::default()
    };
    let criteria = spec.resolve(&ds.vocabulary()).expect("known region");
    let working = apply(ds.all_records(), &criteria);

    assert_eq!(working.len(), 4);
    assert!(working.iter().all(|r| r.state == "SP" || r.state == "MG"));
}

#[test]
fn test_unknown_region_is_configuration_error() {
    let ds = dataset();
    let spec = FilterSpec {
        region: Some("Centro-Oeste".to_string()),
        ..FilterSpec::default()
    };
    assert!(matches!(
        spec.resolve(&ds.vocabulary()),
        Err(ConfigError::UnknownRegion(_))
    ));
}

#[test]
fn test_gas_shares_sum_to_hundred() {
    let ds = dataset();
    let working = apply(ds.all_records(), &FilterCriteria::full(&ds.vocabulary()));
    let shares = percentage(&group_sum(&working, Dimension::Gas), TOTAL_EMISSION).expect("column");
    let total = shares.total(SHARE).expect("share column");
    assert!((total - 100.0).abs() < 1e-6);
}

#[test]
fn test_dominant_sector_per_state() {
    let ds = dataset();
    let working = apply(ds.all_records(), &FilterCriteria::full(&ds.vocabulary()));
    let top = top_per_group(&working, Dimension::State, Dimension::Sector);

    let rs = top.find(&Key::from("RS")).expect("RS present");
    assert_eq!(rs.keys[1], Key::from("Energia"));
    assert_eq!(rs.measure(0), Some(400_000.0));
}

#[test]
fn test_extremes_on_empty_selection() {
    let ds = dataset();
    let spec = FilterSpec {
        years: Some((1950, 1960)),
        ..FilterSpec::default()
    };
    let working = apply(ds.all_records(), &spec.resolve(&ds.vocabulary()).expect("valid"));
    let totals = group_sum(&working, Dimension::Year);
    assert_eq!(
        arg_extreme(&totals, TOTAL_EMISSION, ExtremeMode::Max),
        Err(AggregateError::EmptyTable)
    );
}

// =============================================================================
// Summary + config
// =============================================================================

#[test]
fn test_summary_from_config() {
    let config = DashboardConfig::from_yaml(
        r#"
emissions: "0.1"
name: Sul
data:
  source: emissoes.json
filters:
  region: Sul
"#,
    )
    .expect("valid config");

    let ds = dataset();
    let criteria = config.filters.resolve(&ds.vocabulary()).expect("valid");
    let summary = Summary::from_store(&ds, &criteria).expect("summary");

    assert_eq!(summary.record_count, 2);
    assert_eq!(summary.formatted_total().expect("in domain"), "700.00 k");
    let h = summary.highlights.expect("non-empty");
    assert_eq!(h.max_year.label, "2020");
    assert_eq!(h.max_gas.label, "CO2");
}

#[test]
fn test_summary_full_dataset() {
    let ds = dataset();
    let summary =
        Summary::from_store(&ds, &FilterCriteria::full(&ds.vocabulary())).expect("summary");

    assert_eq!(summary.formatted_total().expect("in domain"), "10.05 m");
    let h = summary.highlights.expect("non-empty");
    assert_eq!(h.max_state.label, "AM");
    assert_eq!(h.min_state.label, "RS");
    assert_eq!(h.min_year.label, "2019");
    assert_eq!(h.min_gas.label, "N2O");
    assert_eq!(
        summary.state_top_gas.find(&Key::from("MG")).map(|r| r.keys[1].clone()),
        Some(Key::from("CH4"))
    );
}
