// 🚀 Reconciliation Pipeline - archive + current extract → unified tables
//
// Stage order:
//   1. games        → GameCatalog
//   2. countries    → CountryTable (+ names for new NOCs)
//   3. results      → rows, participation years, max result_id
//   4. athletes     → seeded AthleteIdentityResolver
//   5. lookups      → medals, teams, event catalog
//   6. per athlete  → resolve + merge
//   7. gap fill     → every medal represented
//   8. tally        → ages + medal tally
//   9. writers

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::PipelineConfig;
use crate::entities::{CountryTable, EventResultRow, GameCatalog};
use crate::gap_fill::MedalGapFiller;
use crate::identity::AthleteIdentityResolver;
use crate::io;
use crate::merger::EventResultMerger;
use crate::tally::{TallyAggregator, TallyEntry};

/// Counts reported after a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub editions: usize,
    pub historical_rows: usize,
    pub historical_athletes: usize,
    pub new_athletes: usize,
    pub identities_minted: usize,
    pub rows_merged: usize,
    pub rows_gap_filled: usize,
    pub result_ids_assigned: usize,
    pub tally_entries: usize,
}

impl RunSummary {
    pub fn summary(&self) -> String {
        format!(
            "{} new athletes ({} new identities), {} rows merged, {} gap-filled, {} tally entries",
            self.new_athletes,
            self.identities_minted,
            self.rows_merged,
            self.rows_gap_filled,
            self.tally_entries
        )
    }
}

/// Everything produced by a run, before it is written out
pub struct Reconciled {
    pub games: GameCatalog,
    pub countries: CountryTable,
    pub resolver: AthleteIdentityResolver,
    pub rows: Vec<EventResultRow>,
    pub tally: Vec<TallyEntry>,
    pub summary: RunSummary,
}

pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Pipeline { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Reconcile and write all output tables
    pub fn run(&self) -> Result<RunSummary> {
        let reconciled = self.reconcile()?;
        self.write(&reconciled)?;
        Ok(reconciled.summary)
    }

    /// Run every stage in memory without writing anything
    pub fn reconcile(&self) -> Result<Reconciled> {
        let config = &self.config;
        let inputs = &config.inputs;
        let current = &config.current_games;
        let mut summary = RunSummary::default();

        let games = io::read_games(&config.input_path(&inputs.games), current)?;
        summary.editions = games.len();
        info!(editions = games.len(), "Loaded games");

        let mut countries = io::read_countries(&config.input_path(&inputs.countries))?;
        let added_nocs = io::add_new_nocs(&config.input_path(&inputs.new_nocs), &mut countries)?;
        info!(countries = countries.len(), added_nocs, "Loaded countries");

        let historical = io::read_event_results(&config.input_path(&inputs.event_results), &games)?;
        summary.historical_rows = historical.rows.len();
        info!(
            rows = historical.rows.len(),
            max_result_id = historical.max_result_id,
            "Loaded historical results"
        );

        let athletes = io::read_athletes(&config.input_path(&inputs.athletes))?;
        summary.historical_athletes = athletes.len();
        let mut resolver = AthleteIdentityResolver::seed(athletes, &historical.participation);
        info!(
            identities = resolver.len(),
            max_athlete_id = resolver.max_id(),
            "Seeded athlete identities"
        );

        let medals = io::read_medallists(&config.input_path(&inputs.new_medallists))?;
        let teams = io::read_teams(&config.input_path(&inputs.new_teams))?;
        let catalog = io::read_events(&config.input_path(&inputs.new_events))?;
        info!(
            medals = medals.len(),
            team_memberships = teams.len(),
            events = catalog.len(),
            "Loaded current games lookups"
        );

        let new_athletes = io::read_new_athletes(&config.input_path(&inputs.new_athletes))?;
        summary.new_athletes = new_athletes.len();

        let mut rows = historical.rows;
        let mut merger = EventResultMerger::new(
            &catalog,
            &medals,
            &teams,
            current,
            historical.max_result_id,
        );
        for record in &new_athletes {
            let athlete_id = resolver.resolve(record);
            summary.rows_merged += merger.merge(record, athlete_id, &mut rows);
        }
        summary.identities_minted = resolver.minted_count();
        summary.result_ids_assigned = merger.numbering().len();
        info!(
            merged = summary.rows_merged,
            minted = summary.identities_minted,
            result_ids = summary.result_ids_assigned,
            "Merged current games athletes"
        );

        let emitted = merger.into_emitted();
        summary.rows_gap_filled = MedalGapFiller::new(current, &teams)
            .fill(&medals, &emitted, &resolver, &mut rows)
            .context("Medal gap fill failed")?;
        info!(gap_filled = summary.rows_gap_filled, "Filled medal gaps");

        let tally = TallyAggregator::new(&games, &resolver, &countries).aggregate(&mut rows);
        summary.tally_entries = tally.len();
        info!(entries = tally.len(), "Computed medal tally");

        Ok(Reconciled {
            games,
            countries,
            resolver,
            rows,
            tally,
            summary,
        })
    }

    /// Write the four output tables
    pub fn write(&self, reconciled: &Reconciled) -> Result<()> {
        let config = &self.config;
        let outputs = &config.outputs;

        io::write_rows(
            &config.output_path(&outputs.athletes),
            reconciled.resolver.identities(),
        )?;
        io::write_rows(&config.output_path(&outputs.event_results), &reconciled.rows)?;
        io::write_rows(&config.output_path(&outputs.tally), &reconciled.tally)?;
        io::write_rows(
            &config.output_path(&outputs.games),
            reconciled.games.editions(),
        )?;

        info!(output_dir = %config.output_dir.display(), "Wrote output tables");
        Ok(())
    }
}

/// Convenience wrapper: build a pipeline and run it
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    Pipeline::new(config.clone()).run()
}
