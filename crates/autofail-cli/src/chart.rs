// Chart file: hit objects plus optional timing parameters, stored as JSON.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use autofail_model::{HitObject, Timeline, TimingParams};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub hit_objects: Vec<HitObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<TimingParams>,
}

impl Chart {
    pub fn read(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read chart {}", path.display()))?;
        let mut chart: Chart = serde_json::from_str(&data)
            .with_context(|| format!("failed to parse chart {}", path.display()))?;
        if let Some(params) = chart.params.as_mut() {
            params.validate();
        }
        Ok(chart)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("failed to write chart {}", path.display()))?;
        Ok(())
    }

    /// Replace the hit objects with the (sorted) contents of `timeline`.
    pub fn set_timeline(&mut self, timeline: Timeline) {
        self.hit_objects = timeline.into_objects();
    }

    pub fn timeline(&self) -> Timeline {
        Timeline::new(self.hit_objects.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autofail_model::HitKind;

    #[test]
    fn test_read_minimal_chart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.json");
        fs::write(
            &path,
            r#"{"hitObjects":[
                {"startTime":500,"endTime":500,"kind":"point"},
                {"startTime":0,"endTime":3000,"kind":"channeledRange","position":{"x":256.0,"y":192.0}}
            ]}"#,
        )
        .unwrap();

        let chart = Chart::read(&path).unwrap();
        assert_eq!(chart.params, None);
        let tl = chart.timeline();
        assert_eq!(tl.objects()[0].kind, HitKind::ChanneledRange);
        assert_eq!(tl.objects()[0].position.x, 256.0);
        assert_eq!(tl.objects()[1], HitObject::point(500));
    }

    #[test]
    fn test_params_are_clamped_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.json");
        fs::write(
            &path,
            r#"{"hitObjects":[],"params":{"approachTime":5000,"hitWindow50":-3}}"#,
        )
        .unwrap();

        let params = Chart::read(&path).unwrap().params.unwrap();
        assert_eq!(params.approach_time, 1800);
        assert_eq!(params.hit_window_50, 0);
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let chart = Chart {
            hit_objects: vec![HitObject::held_range(0, 400), HitObject::filler(399)],
            params: Some(TimingParams::new(900, 120, 10)),
        };
        chart.write(&path).unwrap();
        assert_eq!(Chart::read(&path).unwrap(), chart);
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = Chart::read(Path::new("/nonexistent/chart.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read chart"));
    }
}
