use crate::core::{IterativeMean, Mean, StepRule};
use crate::means::{Agm, ClocksAtSea, ExtendedAgm, Geothdian};
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::{MeanChoice, MeanParameters};
use std::convert::TryFrom;
use std::fs;
use std::path::Path;

fn check_limits(parameters: &MeanParameters) -> Result<(), BuildError> {
    if parameters.max_iterations == 0 {
        return Err(BuildError::InvalidParameter(
            "max_iterations must be >= 1".into(),
        ));
    }
    Ok(())
}

fn build_iterative<R: StepRule>(
    parameters: MeanParameters,
) -> Result<IterativeMean<R>, BuildError> {
    check_limits(&parameters)?;
    let mut mean = IterativeMean::<R>::new(parameters.data)?;
    mean.set_precision(parameters.precision)?;
    mean.set_max_iterations(parameters.max_iterations);
    Ok(mean)
}

impl TryFrom<MeanParameters> for Agm {
    type Error = BuildError;

    fn try_from(parameters: MeanParameters) -> Result<Self, Self::Error> {
        build_iterative(parameters)
    }
}

impl TryFrom<MeanParameters> for Geothdian {
    type Error = BuildError;

    fn try_from(parameters: MeanParameters) -> Result<Self, Self::Error> {
        build_iterative(parameters)
    }
}

impl TryFrom<MeanParameters> for ClocksAtSea {
    type Error = BuildError;

    fn try_from(parameters: MeanParameters) -> Result<Self, Self::Error> {
        build_iterative(parameters)
    }
}

impl TryFrom<MeanParameters> for ExtendedAgm {
    type Error = BuildError;

    fn try_from(parameters: MeanParameters) -> Result<Self, Self::Error> {
        check_limits(&parameters)?;
        let mut mean = ExtendedAgm::new(parameters.data)?;
        mean.set_precision(parameters.precision)?;
        mean.set_max_iterations(parameters.max_iterations);
        Ok(mean)
    }
}

pub fn build_mean(choice: MeanChoice) -> Result<Box<dyn Mean>, BuildError> {
    match choice {
        MeanChoice::Agm(p) => Ok(Box::new(Agm::try_from(p)?)),
        MeanChoice::Geothdian(p) => Ok(Box::new(Geothdian::try_from(p)?)),
        MeanChoice::ClocksAtSea(p) => Ok(Box::new(ClocksAtSea::try_from(p)?)),
        MeanChoice::ExtendedAgm(p) => Ok(Box::new(ExtendedAgm::try_from(p)?)),
    }
}

/// Reads a JSON-encoded [`MeanChoice`] from disk.
pub fn load_choice<P: AsRef<Path>>(path: P) -> Result<MeanChoice, BuildError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MeanError;
    use crate::ui::types::choices::MeanKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn params(data: Vec<f64>) -> MeanParameters {
        MeanParameters {
            data,
            ..MeanParameters::default()
        }
    }

    #[test]
    fn builds_each_kind_with_its_name() {
        let cases = [
            (MeanKind::Agm, "agm"),
            (MeanKind::Geothdian, "geothdian"),
            (MeanKind::ClocksAtSea, "clocks-at-sea"),
            (MeanKind::ExtendedAgm, "extended-agm"),
        ];
        for (kind, name) in cases {
            let m = build_mean(MeanChoice::with_params(kind, params(vec![1.0, 2.0]))).unwrap();
            assert_eq!(m.name(), name);
            assert_eq!(m.size(), 2);
        }
    }

    #[test]
    fn applies_precision_and_cap() {
        let p = MeanParameters {
            data: vec![1.0, 2.0],
            precision: 1e-3,
            max_iterations: 40,
            depth: None,
        };
        let m = build_mean(MeanChoice::Geothdian(p)).unwrap();
        assert_eq!(m.precision(), 1e-3);
        assert_eq!(m.max_iterations(), 40);
    }

    #[test]
    fn invalid_precision_is_a_mean_error() {
        let p = MeanParameters {
            precision: 0.0,
            ..params(vec![1.0])
        };
        let err = build_mean(MeanChoice::Agm(p)).err().unwrap();
        assert!(matches!(
            err,
            BuildError::Mean(MeanError::InvalidPrecision(_))
        ));
    }

    #[test]
    fn zero_cap_is_rejected() {
        let p = MeanParameters {
            max_iterations: 0,
            ..params(vec![1.0])
        };
        let err = build_mean(MeanChoice::ClocksAtSea(p)).err().unwrap();
        assert!(matches!(err, BuildError::InvalidParameter(_)));
    }

    #[test]
    fn negative_data_only_allowed_for_extended_agm() {
        let data = vec![-1.0, 2.0];
        assert!(matches!(
            build_mean(MeanChoice::Agm(params(data.clone()))).err(),
            Some(BuildError::Mean(MeanError::NegativeValue { .. }))
        ));
        assert!(build_mean(MeanChoice::ExtendedAgm(params(data))).is_ok());
    }

    #[test]
    fn empty_data_is_rejected() {
        assert!(matches!(
            build_mean(MeanChoice::Geothdian(params(vec![]))).err(),
            Some(BuildError::Mean(MeanError::EmptyDataset))
        ));
    }

    #[test]
    fn loads_choice_from_json_file() {
        let mut tf = NamedTempFile::new().unwrap();
        writeln!(
            tf,
            r#"{{"type":"agm","params":{{"data":[1.0,2.0],"precision":1e-9}}}}"#
        )
        .unwrap();
        let c = load_choice(tf.path()).unwrap();
        assert_eq!(c.kind(), MeanKind::Agm);
        assert_eq!(c.params().precision, 1e-9);
    }

    #[test]
    fn malformed_or_missing_file() {
        let mut tf = NamedTempFile::new().unwrap();
        writeln!(tf, "not json").unwrap();
        assert!(matches!(load_choice(tf.path()), Err(BuildError::Json(_))));
        assert!(matches!(
            load_choice("/definitely/not/here.json"),
            Err(BuildError::Io(_))
        ));
    }
}
