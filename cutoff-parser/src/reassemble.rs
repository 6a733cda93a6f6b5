use cutoff_model::{CutoffRecord, DocumentOutput, Page, PageOutput, UNKNOWN};
use log::debug;

use crate::classify::{classify_line, LineClass};
use crate::config::{ParserConfig, PercentileFill};
use crate::normalize::{clean_rank_token, normalize_seat_type, CorrectionTable};
use crate::ParserError;

/// Page-scoped context from the header lines near the top. Reset for every
/// page; pages are self-describing.
#[derive(Debug, Default)]
struct PageContext {
    institute_code: Option<String>,
    institute_name: String,
    district: String,
    institute_status: String,
}

/// Branch-scoped context; reset on every branch header.
#[derive(Debug, Default)]
struct BranchContext {
    code: String,
    name: String,
    section: Option<String>,
    /// Admission round counter. Increments when a second rank line shares
    /// one seat-type header; resets to 1 on any structural change.
    stage: u32,
}

impl BranchContext {
    fn reset(&mut self, code: String, name: String) {
        self.code = code;
        self.name = name;
        self.section = None;
        self.stage = 1;
    }
}

/// Row-completion state. A row needs seat types and ranks to emit;
/// percentiles are optional and never complete a row by themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowState {
    Idle,
    HaveSeatTypes,
    HaveSeatTypesAndRanks,
}

/// The in-progress seat-type row awaiting completion.
#[derive(Debug)]
struct PendingRow {
    seat_types: Vec<String>,
    ranks: Vec<String>,
    percentiles: Vec<String>,
    state: RowState,
}

impl PendingRow {
    fn new() -> Self {
        Self {
            seat_types: Vec::new(),
            ranks: Vec::new(),
            percentiles: Vec::new(),
            state: RowState::Idle,
        }
    }
}

/// Explicit mutable parse session: owns the config, correction table and
/// the document-wide serial counter. The session is the single writer of
/// the counter; callers that parse pages in parallel must either serialize
/// access to one session or renumber after concatenation.
#[derive(Debug)]
pub struct ParseSession {
    config: ParserConfig,
    corrections: CorrectionTable,
    next_serial: u32,
}

impl ParseSession {
    pub fn new(config: ParserConfig) -> Result<Self, ParserError> {
        Self::with_corrections(config, CorrectionTable::default())
    }

    pub fn with_corrections(
        config: ParserConfig,
        corrections: CorrectionTable,
    ) -> Result<Self, ParserError> {
        config.validate()?;
        let next_serial = config.serial_start;
        Ok(Self { config, corrections, next_serial })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// The serial the next emitted record will receive.
    pub fn next_serial(&self) -> u32 {
        self.next_serial
    }

    /// Parse one page's raw lines into records plus warnings.
    ///
    /// Fails only on the programming-contract violation of a page with no
    /// text; every structural miss is reported as a warning and recovered
    /// with best-effort data.
    pub fn parse_page(&mut self, page: &Page) -> Result<PageOutput, ParserError> {
        if page.text.trim().is_empty() {
            return Err(ParserError::EmptyPage(page.number));
        }

        let mut out = PageOutput::default();
        let mut ctx = PageContext {
            institute_name: UNKNOWN.to_string(),
            district: UNKNOWN.to_string(),
            institute_status: UNKNOWN.to_string(),
            ..PageContext::default()
        };
        let mut branch = BranchContext {
            code: UNKNOWN.to_string(),
            name: UNKNOWN.to_string(),
            stage: 1,
            ..BranchContext::default()
        };
        let mut pending = PendingRow::new();

        for line in page.text.lines() {
            let class = classify_line(line, &self.config);
            debug!("page {} line classified as {:?}", page.number, class);
            match class {
                LineClass::Institute { code, name, district } => {
                    self.flush(&mut pending, &ctx, &branch, false, &mut out);
                    ctx.institute_code = Some(code);
                    ctx.institute_name = name;
                    ctx.district = district.unwrap_or_else(|| UNKNOWN.to_string());
                }
                LineClass::Status { text } => {
                    self.flush(&mut pending, &ctx, &branch, false, &mut out);
                    ctx.institute_status = text;
                }
                LineClass::Branch { code, name } => {
                    // Emit before reset: a completed row from the previous
                    // branch must never carry the new branch code.
                    self.flush(&mut pending, &ctx, &branch, false, &mut out);
                    if code.len() != self.config.branch_code_width {
                        out.warnings.push(format!(
                            "page {}: branch code {} has {} digits, expected {}",
                            page.number,
                            code,
                            code.len(),
                            self.config.branch_code_width
                        ));
                    }
                    branch.reset(code, name);
                }
                LineClass::Section { label } => {
                    self.flush(&mut pending, &ctx, &branch, false, &mut out);
                    branch.section = Some(label);
                    branch.stage = 1;
                }
                LineClass::SeatTypeRow { tokens } => {
                    self.flush(&mut pending, &ctx, &branch, false, &mut out);
                    pending.seat_types = tokens
                        .iter()
                        .map(|t| normalize_seat_type(t, &self.corrections))
                        .collect();
                    pending.state = RowState::HaveSeatTypes;
                    branch.stage = 1;
                }
                LineClass::Rank { tokens } => {
                    if pending.state == RowState::HaveSeatTypesAndRanks {
                        // Second rank line under the same header: another
                        // admission round sharing the seat-type list.
                        self.flush(&mut pending, &ctx, &branch, true, &mut out);
                        branch.stage += 1;
                    }
                    if pending.state == RowState::Idle {
                        out.warnings.push(format!(
                            "page {}: rank line with no pending seat-type header: {:?}",
                            page.number,
                            line.trim()
                        ));
                        continue;
                    }
                    pending.ranks = tokens
                        .iter()
                        .map(|t| match clean_rank_token(t, &self.corrections) {
                            Some(digits) => digits,
                            None => {
                                out.warnings.push(format!(
                                    "page {}: rank token {:?} yielded no digits; kept as-is",
                                    page.number, t
                                ));
                                t.clone()
                            }
                        })
                        .collect();
                    pending.state = RowState::HaveSeatTypesAndRanks;
                }
                LineClass::Percentile { values } => {
                    if pending.state == RowState::HaveSeatTypesAndRanks {
                        // Percentile lines follow their rank line; wrapped
                        // rows can span several lines, so extend.
                        pending.percentiles.extend(values);
                    } else {
                        out.warnings.push(format!(
                            "page {}: percentile line with no preceding rank line",
                            page.number
                        ));
                    }
                }
                LineClass::Other => {}
            }
        }

        // End of page: whatever is still pending is final.
        self.flush(&mut pending, &ctx, &branch, false, &mut out);

        if ctx.institute_code.is_none() {
            out.warnings.push(format!(
                "page {}: no institute header recognized; page contributed no records",
                page.number
            ));
        }
        Ok(out)
    }

    /// Fold a document's pages through the session. Per-page failures are
    /// isolated into warnings; the document is never aborted.
    pub fn parse_pages(&mut self, pages: &[Page]) -> DocumentOutput {
        let mut doc = DocumentOutput::default();
        for page in pages {
            doc.pages_seen += 1;
            match self.parse_page(page) {
                Ok(mut out) => {
                    doc.records.append(&mut out.records);
                    doc.warnings.append(&mut out.warnings);
                }
                Err(e) => doc.warnings.push(format!("page {}: {}", page.number, e)),
            }
        }
        doc
    }

    /// Finalize the pending row: zip seat types and ranks positionally,
    /// truncating to the shortest non-empty list, emit one record per
    /// position, then reset. `carry_seat_types` keeps the seat-type list as
    /// the base for the next stage (same-header second rank line); any
    /// structural change clears it entirely.
    fn flush(
        &mut self,
        pending: &mut PendingRow,
        ctx: &PageContext,
        branch: &BranchContext,
        carry_seat_types: bool,
        out: &mut PageOutput,
    ) {
        if pending.state == RowState::HaveSeatTypesAndRanks
            && !pending.seat_types.is_empty()
            && !pending.ranks.is_empty()
        {
            if let Some(code) = &ctx.institute_code {
                let mut n = pending.seat_types.len().min(pending.ranks.len());
                if pending.seat_types.len() != pending.ranks.len() {
                    out.warnings.push(format!(
                        "row alignment: {} seat types vs {} ranks; unmatched tail dropped",
                        pending.seat_types.len(),
                        pending.ranks.len()
                    ));
                }
                if self.config.percentile_fill == PercentileFill::Truncate
                    && !pending.percentiles.is_empty()
                {
                    n = n.min(pending.percentiles.len());
                }
                for j in 0..n {
                    let percentile = match pending.percentiles.get(j) {
                        Some(p) => Some(p.clone()),
                        None => match self.config.percentile_fill {
                            PercentileFill::ZeroFill => Some("0.00".to_string()),
                            _ => None,
                        },
                    };
                    out.records.push(CutoffRecord {
                        serial: self.next_serial,
                        stage: branch.stage,
                        district: ctx.district.clone(),
                        institute_status: ctx.institute_status.clone(),
                        institute_code: code.clone(),
                        institute_name: ctx.institute_name.clone(),
                        branch_code: branch.code.clone(),
                        branch_name: branch.name.clone(),
                        seat_type: pending.seat_types[j].clone(),
                        rank: pending.ranks[j].clone(),
                        percentile,
                    });
                    self.next_serial += 1;
                }
            } else {
                out.warnings.push(
                    "row data seen before any institute header; dropped".to_string(),
                );
            }
        }

        pending.ranks.clear();
        pending.percentiles.clear();
        if carry_seat_types && !pending.seat_types.is_empty() {
            pending.state = RowState::HaveSeatTypes;
        } else {
            pending.seat_types.clear();
            pending.state = RowState::Idle;
        }
    }
}
