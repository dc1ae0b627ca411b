//! Sample command implementation.

use crate::{Format, Kind};
use anyhow::{Context, Result};
use fido_attrs::Attr;
use fido_strategies::{DeltaComponents, Sampler};
use serde::Serialize;
use std::io::Write;
use tracing::info;

/// One printable sample.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Sample {
    Delta(DeltaComponents),
    Attr(Attr),
}

impl Sample {
    fn render(&self, format: Format) -> Result<String> {
        match (self, format) {
            (_, Format::Json) => serde_json::to_string(self).context("Failed to encode sample"),
            (Self::Delta(delta), Format::Text) => Ok(render_delta(delta)),
            (Self::Attr(attr), Format::Text) => Ok(attr.to_string()),
        }
    }
}

fn render_delta(delta: &DeltaComponents) -> String {
    let parts: Vec<String> = delta
        .components()
        .iter()
        .filter(|(_, magnitude)| *magnitude > 0.0)
        .map(|(unit, magnitude)| format!("{unit}={magnitude}"))
        .collect();
    format!("{} ({})", parts.join(" "), delta.to_duration())
}

fn draw(sampler: &mut Sampler, kind: Kind) -> Result<Sample> {
    let sample = match kind {
        Kind::Delta => Sample::Delta(sampler.delta()?),
        Kind::Offline => Sample::Attr(sampler.offline_instrument()?),
        Kind::Online => Sample::Attr(sampler.online_instrument()?),
        Kind::Time => Sample::Attr(sampler.time_attr()?.into()),
        Kind::GoesTime => Sample::Attr(sampler.goes_time()?.into()),
        Kind::RhessiTime => Sample::Attr(sampler.rhessi_time()?.into()),
    };
    Ok(sample)
}

/// Draws `count` samples of `kind` and writes one per line.
pub fn run(
    sampler: &mut Sampler,
    kind: Kind,
    format: Format,
    count: usize,
    out: &mut impl Write,
) -> Result<()> {
    info!(
        "Generating {} {:?} sample(s) with seed {}",
        count,
        kind,
        sampler.config().seed
    );

    for index in 0..count {
        let sample =
            draw(sampler, kind).with_context(|| format!("Failed to draw sample {index}"))?;
        writeln!(out, "{}", sample.render(format)?).context("Failed to write sample")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fido_strategies::SamplerConfig;

    fn lines(kind: Kind, format: Format, count: usize) -> Vec<String> {
        let mut sampler = Sampler::new(SamplerConfig::default().with_seed(3));
        let mut out = Vec::new();
        run(&mut sampler, kind, format, count, &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn prints_one_line_per_sample() {
        assert_eq!(lines(Kind::GoesTime, Format::Json, 5).len(), 5);
        assert!(lines(Kind::Delta, Format::Text, 0).is_empty());
    }

    #[test]
    fn online_json_is_rhessi() {
        for line in lines(Kind::Online, Format::Json, 3) {
            assert_eq!(line, r#"{"instrument":"rhessi"}"#);
        }
    }

    #[test]
    fn time_json_has_both_endpoints() {
        for line in lines(Kind::RhessiTime, Format::Json, 3) {
            let value: serde_json::Value = serde_json::from_str(&line).unwrap();
            assert!(value["time"]["range"]["start"].is_string());
            assert!(value["time"]["range"]["end"].is_string());
        }
    }

    #[test]
    fn delta_text_shows_duration() {
        let delta = DeltaComponents {
            weeks: 2.0,
            ..Default::default()
        };
        assert!(render_delta(&delta).starts_with("weeks=2 ("));
    }

    #[test]
    fn same_seed_same_output() {
        assert_eq!(
            lines(Kind::Offline, Format::Text, 8),
            lines(Kind::Offline, Format::Text, 8)
        );
    }
}
