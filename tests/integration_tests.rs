use accident_etl::{
    AccidentPipeline, EtlEngine, EtlError, LocalStorage, ReporterKind, SchemaPolicy, Settings,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn accident_line(time: &str, lat: &str, lng: &str, weather: &str, time_of_day: &str) -> String {
    let mut fields = vec![String::new(); 54];
    fields[0] = "A-1".to_string();
    fields[1] = "Source2".to_string();
    fields[2] = time.to_string();
    fields[3] = "2016-02-08 11:00:00".to_string();
    fields[4] = lat.to_string();
    fields[5] = lng.to_string();
    fields[27] = weather.to_string();
    fields[53] = time_of_day.to_string();
    fields.join(",")
}

fn write_input(dir: &TempDir, lines: &[String]) -> PathBuf {
    let path = dir.path().join("accidents.csv");
    std::fs::write(&path, lines.join("\n")).unwrap();
    path
}

const ARTIFACTS: [&str; 4] = [
    "accidents_by_hour.png",
    "accidents_by_time_of_day.png",
    "accidents_by_weather.png",
    "accident_hotspots_map.html",
];

fn settings(input: &Path, output: &Path) -> Settings {
    let mut settings = Settings::new(input.to_str().unwrap());
    settings.output_path = output.to_str().unwrap().to_string();
    settings
}

fn heatmap_only(input: &Path, output: &Path) -> Settings {
    let mut settings = settings(input, output);
    settings.reporters = vec![ReporterKind::Heatmap];
    settings
}

fn assert_all_artifacts_written(output: &Path, artifacts: &[PathBuf]) {
    let expected: Vec<PathBuf> = ARTIFACTS.iter().map(|name| output.join(name)).collect();
    assert_eq!(artifacts, expected.as_slice());
    for path in artifacts {
        let size = std::fs::metadata(path).unwrap().len();
        assert!(size > 0, "{} is empty", path.display());
    }
}

fn engine(settings: Settings) -> EtlEngine<AccidentPipeline<LocalStorage, Settings>> {
    let storage = LocalStorage::new(settings.output_path.clone());
    EtlEngine::new(AccidentPipeline::new(storage, settings))
}

#[test]
fn test_end_to_end_drops_rows_missing_latitude() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(
        &temp_dir,
        &[
            accident_line("2016-02-08 05:46:00", "39.865147", "-84.058723", "Light Rain", "Night"),
            accident_line("2016-02-08 06:07:59", "", "-82.831184", "Light Rain", "Night"),
            accident_line("2016-02-08 06:49:27", "39.063148", "-84.032608", "Overcast", "Night"),
            accident_line("2016-02-08 07:23:34", "", "-84.205582", "Mostly Cloudy", "Night"),
            accident_line("2016-02-08 07:39:07", "39.747753", "-84.205582", "Mostly Cloudy", "Day"),
        ],
    );
    let output = temp_dir.path().join("reports");

    let summary = engine(settings(&input, &output)).run().unwrap();

    assert_eq!(summary.rows_read, 5);
    assert_eq!(summary.rows_accepted, 3);
    assert_eq!(summary.rows_dropped, 2);
    assert_eq!(summary.batches_skipped, 0);
    assert_eq!(summary.rows_malformed, 0);
    assert_all_artifacts_written(&output, &summary.artifacts);

    let html = std::fs::read_to_string(output.join("accident_hotspots_map.html")).unwrap();
    assert!(html.contains("[39.865147,-84.058723]"));
    assert!(html.contains("[39.747753,-84.205582]"));
    assert!(!html.contains("-82.831184"));
}

#[test]
fn test_collected_records_are_complete_with_hours() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(
        &temp_dir,
        &[
            accident_line("2016-02-08 05:46:00", "39.8", "-84.0", "Clear", "Day"),
            accident_line("garbage", "39.1", "-84.1", "Clear", "Day"),
            accident_line("2016-02-08 23:10:00", "39.2", "-84.2", "", ""),
        ],
    );

    let (table, _) = engine(settings(&input, temp_dir.path())).collect().unwrap();

    assert_eq!(table.len(), 2);
    for record in table.iter() {
        assert!(record.is_complete());
        let hour = record.hour.unwrap();
        assert!(hour <= 23);
    }
    assert_eq!(table.records()[1].hour, Some(23));
    assert!(table.records()[1].weather_condition.is_none());
}

#[test]
fn test_batches_keep_arrival_order() {
    let temp_dir = TempDir::new().unwrap();
    let lines: Vec<String> = (0..7)
        .map(|hour| {
            accident_line(
                &format!("2016-02-08 {:02}:15:00", hour),
                &format!("{}.5", 30 + hour),
                "-84.0",
                "Clear",
                "Day",
            )
        })
        .collect();
    let input = write_input(&temp_dir, &lines);

    let mut config = settings(&input, temp_dir.path());
    config.batch_size = 3;
    let (table, summary) = engine(config).collect().unwrap();

    assert_eq!(summary.batches_read, 3);
    let hours: Vec<u32> = table.iter().filter_map(|r| r.hour).collect();
    assert_eq!(hours, vec![0, 1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_header_row_and_wide_rows_are_dropped() {
    let temp_dir = TempDir::new().unwrap();
    let header = accident_line("Start_Time", "Start_Lat", "Start_Lng", "Weather_Condition", "Sunrise_Sunset");
    let mut wide = accident_line("2016-02-08 08:00:00", "39.0", "-84.0", "Rain", "Day");
    wide.push_str(",extra");

    let input = write_input(
        &temp_dir,
        &[
            header,
            accident_line("2016-02-08 05:46:00", "39.8", "-84.0", "Clear", "Day"),
            wide,
        ],
    );

    let (table, summary) = engine(settings(&input, temp_dir.path())).collect().unwrap();
    assert_eq!(summary.rows_read, 2);
    assert_eq!(summary.rows_malformed, 1);
    assert_eq!(table.len(), 1);
}

#[test]
fn test_empty_input_still_writes_every_report() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, &[]);
    let output = temp_dir.path().join("reports");

    let summary = engine(settings(&input, &output)).run().unwrap();

    assert_eq!(summary.rows_accepted, 0);
    assert_eq!(summary.batches_read, 0);
    assert_all_artifacts_written(&output, &summary.artifacts);
    let html = std::fs::read_to_string(output.join("accident_hotspots_map.html")).unwrap();
    assert!(html.contains("var points = [];"));
}

#[test]
fn test_narrow_input_skip_and_strict_policies() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(
        &temp_dir,
        &[
            "1,2,2016-02-08 05:46:00,x,39.8,-84.0".to_string(),
            "1,2,2016-02-08 06:46:00,x,39.9,-84.1".to_string(),
        ],
    );

    let (table, summary) = engine(settings(&input, temp_dir.path())).collect().unwrap();
    assert!(table.is_empty());
    assert_eq!(summary.batches_skipped, 1);
    assert_eq!(summary.rows_dropped, 2);

    let mut strict = settings(&input, temp_dir.path());
    strict.schema_policy = SchemaPolicy::Strict;
    match engine(strict).run() {
        Err(EtlError::SchemaMismatch {
            required, actual, ..
        }) => {
            assert_eq!(required, 54);
            assert_eq!(actual, 6);
        }
        other => panic!("expected schema mismatch, got {:?}", other),
    }
}

#[test]
fn test_missing_input_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("does-not-exist.csv");

    match engine(settings(&input, temp_dir.path())).run() {
        Err(EtlError::IoError(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_heatmap_is_byte_identical_across_runs() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(
        &temp_dir,
        &[
            accident_line("2016-02-08 05:46:00", "39.865147", "-84.058723", "Clear", "Night"),
            accident_line("2016-02-08 06:07:59", "39.928059", "-82.831184", "Clear", "Night"),
        ],
    );
    let first_dir = temp_dir.path().join("first");
    let second_dir = temp_dir.path().join("second");

    let first = engine(heatmap_only(&input, &first_dir)).run().unwrap();
    let second = engine(heatmap_only(&input, &second_dir)).run().unwrap();

    assert_eq!(
        std::fs::read(&first.artifacts[0]).unwrap(),
        std::fs::read(&second.artifacts[0]).unwrap()
    );
}

#[test]
fn test_png_charts_are_valid_images() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(
        &temp_dir,
        &[
            accident_line("2016-02-08 05:46:00", "39.865147", "-84.058723", "Light Rain", "Night"),
            accident_line("2016-02-08 17:20:00", "39.928059", "-82.831184", "Clear", "Day"),
        ],
    );
    let output = temp_dir.path().join("charts");

    let summary = engine(settings(&input, &output)).run().unwrap();

    for path in summary.artifacts.iter().filter(|p| p.extension().is_some_and(|e| e == "png")) {
        let bytes = std::fs::read(path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"), "{} is not a PNG", path.display());
    }
}
