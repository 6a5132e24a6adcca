use lscan_arith::point;
use lscan_core::errors::{ErrorInfo, LscanError};
use lscan_core::{entropy_seed, CharacterSelection, EngineConfig, LogMagnitude};
use lscan_eval::{
    evaluate_at_in, sample_clt_in, scan_character, scan_grid_parallel_in, CharacterGroup,
    Dispatcher, GridSpec, SampleWindow,
};
use serde::Serialize;
use serde_json::Value;

use crate::report::{
    format_complex, provenance, CalcResponse, CltAllResponse, CltPoint, Dataset, ErrorResponse,
    Outcome, ScanAllResponse, ScanPoint,
};
use crate::requests::{
    check_grid_points, check_height, check_modulus, check_samples, internal_index, CalcRequest,
    CltAllRequest, CltRequest, QueryParams, ScanAllRequest, ScanRequest,
};
use crate::serde::{to_canonical_json_bytes, to_json_value};
use crate::stat::DatasetSummary;

/// Routes understood by [`Service::handle`].
pub const ROUTES: [&str; 5] = ["calc", "scan", "scan_all", "clt", "clt_all"];

/// Request handlers bound to one configuration and one worker pool.
#[derive(Debug)]
pub struct Service {
    config: EngineConfig,
    dispatcher: Dispatcher,
}

impl Service {
    /// Validates `config` and builds the worker pool it asks for.
    pub fn new(config: EngineConfig) -> Result<Self, LscanError> {
        config.validate()?;
        let dispatcher = Dispatcher::new(config.threads)?;
        Ok(Self { config, dispatcher })
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluates `L(r + it, chi)` and renders it as text.
    pub fn calc(&self, request: &CalcRequest) -> Result<Outcome<CalcResponse>, LscanError> {
        check_modulus(&self.config.limits, request.q)?;
        check_height(&self.config.limits, request.i)?;
        let precision = self.config.working_precision()?;
        let group = CharacterGroup::new(request.q)?;
        let index = group.validate_index(internal_index(request.character))?;
        let value = evaluate_at_in(&group, point(request.r, request.i), index, precision)?;
        Ok(Outcome {
            payload: CalcResponse {
                result: format_complex(value.re, value.im),
                modulus: request.q,
                character: index + 1,
                s_real: request.r,
                s_imag: request.i,
            },
            provenance: provenance(request.q, precision.bits(), None),
        })
    }

    /// Evaluates one character at `steps + 1` evenly spaced heights.
    pub fn scan(&self, request: &ScanRequest) -> Result<Outcome<Vec<ScanPoint>>, LscanError> {
        check_modulus(&self.config.limits, request.q)?;
        self.check_interval(request.start, request.end)?;
        let precision = self.config.scan_precision()?;
        let grid = GridSpec::with_points(request.start, request.end, request.steps)?;
        check_grid_points(&self.config.limits, grid.len())?;
        let values = scan_character(
            request.q,
            internal_index(request.character),
            &grid,
            precision,
            &self.dispatcher,
        )?;
        Ok(Outcome {
            payload: values
                .into_iter()
                .map(|value| ScanPoint {
                    t: value.t,
                    real: value.real,
                    imag: value.imag,
                })
                .collect(),
            provenance: provenance(request.q, precision.bits(), None),
        })
    }

    /// Scans every character and returns one clamped series per character.
    pub fn scan_all(
        &self,
        request: &ScanAllRequest,
    ) -> Result<Outcome<ScanAllResponse>, LscanError> {
        check_modulus(&self.config.limits, request.q)?;
        self.check_interval(request.start, request.end)?;
        let precision = self.config.scan_precision()?;
        let step = request.resolve_step(&self.config)?;
        let grid = GridSpec::new(request.start, request.end, step)?;
        check_grid_points(&self.config.limits, grid.len())?;
        let group = CharacterGroup::new(request.q)?;
        let size = group.size() as usize;
        let samples = scan_grid_parallel_in(&group, &grid, precision, &self.dispatcher)?;

        let floor = self.config.display_floor;
        let mut datasets: Vec<Dataset> = (0..size)
            .map(|index| Dataset {
                label: index as u64 + 1,
                data: Vec::with_capacity(grid.len()),
            })
            .collect();
        for sample in &samples {
            let value = match sample.log_magnitude {
                LogMagnitude::Finite(value) => value.max(floor),
                LogMagnitude::NegInfinity => floor,
            };
            datasets[sample.character_index as usize].data.push(value);
        }
        Ok(Outcome {
            payload: ScanAllResponse {
                t: grid.heights(),
                datasets,
            },
            provenance: provenance(request.q, precision.bits(), None),
        })
    }

    /// Samples one character over `[start, end)`.
    pub fn clt(&self, request: &CltRequest) -> Result<Outcome<Vec<CltPoint>>, LscanError> {
        check_modulus(&self.config.limits, request.q)?;
        self.check_interval(request.start, request.end)?;
        let precision = self.config.sample_precision()?;
        let samples = request.samples.unwrap_or(self.config.sample_count);
        check_samples(&self.config.limits, samples)?;
        let window = SampleWindow::new(request.start, request.end, samples)?;
        let group = CharacterGroup::new(request.q)?;
        let seed = self.resolve_seed(request.seed);
        let drawn = sample_clt_in(
            &group,
            CharacterSelection::Single(internal_index(request.character)),
            &window,
            precision,
            seed,
            &self.dispatcher,
        )?;
        Ok(Outcome {
            payload: drawn
                .into_iter()
                .map(|sample| CltPoint {
                    t: sample.t,
                    value: sample.normalized.value(),
                })
                .collect(),
            provenance: provenance(request.q, precision.bits(), Some(seed)),
        })
    }

    /// Samples every character over `[T, 2T)`; exact zeros are dropped.
    pub fn clt_all(
        &self,
        request: &CltAllRequest,
    ) -> Result<Outcome<CltAllResponse>, LscanError> {
        check_modulus(&self.config.limits, request.q)?;
        self.check_interval(request.height, 2.0 * request.height)?;
        let precision = self.config.sample_precision()?;
        let samples = request.samples.unwrap_or(self.config.sample_count);
        check_samples(&self.config.limits, samples)?;
        let window = SampleWindow::doubling(request.height, samples)?;
        let group = CharacterGroup::new(request.q)?;
        let size = group.size() as usize;
        let seed = self.resolve_seed(request.seed);
        let drawn = sample_clt_in(
            &group,
            CharacterSelection::All,
            &window,
            precision,
            seed,
            &self.dispatcher,
        )?;

        let mut datasets: Vec<Dataset> = (0..size)
            .map(|index| Dataset {
                label: index as u64 + 1,
                data: Vec::with_capacity(samples),
            })
            .collect();
        for sample in &drawn {
            if let Some(value) = sample.normalized.value() {
                datasets[sample.character_index as usize].data.push(value);
            }
        }
        let summaries = request.summary.then(|| {
            datasets
                .iter()
                .map(|dataset| DatasetSummary::from_values(dataset.label, &dataset.data))
                .collect()
        });
        Ok(Outcome {
            payload: CltAllResponse {
                datasets,
                summaries,
            },
            provenance: provenance(request.q, precision.bits(), Some(seed)),
        })
    }

    /// Dispatches a named route with raw query parameters.
    pub fn handle(&self, route: &str, params: &QueryParams) -> Result<Outcome<Value>, LscanError> {
        log::debug!("handling route {route}");
        match route.trim_start_matches('/') {
            "calc" => json_outcome(self.calc(&CalcRequest::from_query(params)?)?),
            "scan" => json_outcome(self.scan(&ScanRequest::from_query(params)?)?),
            "scan_all" => json_outcome(self.scan_all(&ScanAllRequest::from_query(params)?)?),
            "clt" => json_outcome(self.clt(&CltRequest::from_query(params)?)?),
            "clt_all" => json_outcome(self.clt_all(&CltAllRequest::from_query(params)?)?),
            other => Err(LscanError::Config(
                ErrorInfo::new("route_unknown", "no handler for route")
                    .with_context("route", other)
                    .with_hint(format!("expected one of {}", ROUTES.join(", "))),
            )),
        }
    }

    /// Canonical JSON body for a route: the payload, or `{"error": ...}`.
    ///
    /// Only a failure to serialize the body itself is returned as `Err`.
    pub fn respond(&self, route: &str, params: &QueryParams) -> Result<Vec<u8>, LscanError> {
        match self.handle(route, params) {
            Ok(outcome) => to_canonical_json_bytes(&outcome.payload),
            Err(err) => {
                log::warn!("route {route} failed: {err}");
                to_canonical_json_bytes(&ErrorResponse::from(&err))
            }
        }
    }

    fn check_interval(&self, start: f64, end: f64) -> Result<(), LscanError> {
        check_height(&self.config.limits, start)?;
        check_height(&self.config.limits, end)
    }

    fn resolve_seed(&self, requested: Option<u64>) -> u64 {
        requested.or(self.config.seed).unwrap_or_else(entropy_seed)
    }
}

fn json_outcome<T: Serialize>(outcome: Outcome<T>) -> Result<Outcome<Value>, LscanError> {
    Ok(Outcome {
        payload: to_json_value(&outcome.payload)?,
        provenance: outcome.provenance,
    })
}
