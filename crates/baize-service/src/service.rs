use tracing::info;

use baize_ledger::{
    AuditEntry, BulkImporter, GameRevision, ImportRow, IngestReport, MatchOutcome,
    ProjectionBuilder, RevisionReader, RevisionWriter,
};
use baize_standings::StandingsTable;
use baize_types::{Identity, MatchupId, PlayerId};

use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::roster::RosterProvider;

/// The internal service boundary of the league.
///
/// Each operation maps one-to-one onto an endpoint of the external web
/// layer. Role gating happens here, before any ledger call; the ledger
/// independently enforces its own invariants on whatever gets through.
pub struct LeagueService<L, R> {
    ledger: L,
    roster: R,
    config: ServiceConfig,
}

impl<L, R> LeagueService<L, R>
where
    L: RevisionWriter + RevisionReader,
    R: RosterProvider,
{
    pub fn new(ledger: L, roster: R) -> Self {
        Self::with_config(ledger, roster, ServiceConfig::default())
    }

    pub fn with_config(ledger: L, roster: R, config: ServiceConfig) -> Self {
        Self {
            ledger,
            roster,
            config,
        }
    }

    /// Direct access to the underlying ledger, for projections beyond
    /// the boundary operations (e.g. validation sweeps).
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Record a new match result. Member-level.
    ///
    /// Both players must be on the roster; the acting member is recorded
    /// as author.
    pub fn log_game(
        &self,
        identity: &Identity,
        outcome: &MatchOutcome,
    ) -> Result<GameRevision, ServiceError> {
        self.require_member(identity)?;
        self.require_known(&outcome.winner)?;
        self.require_known(&outcome.loser)?;

        let revision = self.ledger.append_new_match(outcome, &identity.actor)?;
        info!(matchup = %revision.matchup(), author = %identity.actor, "game logged");
        Ok(revision)
    }

    /// Edit an existing match by appending a revision. Member-level.
    ///
    /// Fails visibly when the matchup was never logged.
    pub fn edit_game(
        &self,
        identity: &Identity,
        matchup: &MatchupId,
        outcome: &MatchOutcome,
    ) -> Result<GameRevision, ServiceError> {
        self.require_member(identity)?;

        let revision = self
            .ledger
            .append_revision(matchup, outcome, &identity.actor)?;
        info!(
            matchup = %revision.matchup(),
            revision_seq = revision.revision_seq,
            author = %identity.actor,
            "game edited"
        );
        Ok(revision)
    }

    /// The current state of every matchup, newest match date first.
    pub fn match_history(&self, identity: &Identity) -> Result<Vec<GameRevision>, ServiceError> {
        self.require_read(identity)?;
        Ok(ProjectionBuilder::current_matches(&self.ledger)?)
    }

    /// The league table over current matches and the full roster.
    pub fn standings(&self, identity: &Identity) -> Result<StandingsTable, ServiceError> {
        self.require_read(identity)?;
        let roster = self.roster.players()?;
        let current = ProjectionBuilder::current_matches(&self.ledger)?;
        Ok(StandingsTable::build(&roster, &current))
    }

    /// The complete change history, superseded revisions included.
    /// Member-level regardless of the anonymous-read setting.
    pub fn audit_trail(&self, identity: &Identity) -> Result<Vec<AuditEntry>, ServiceError> {
        self.require_member(identity)?;
        Ok(ProjectionBuilder::audit_trail(&self.ledger)?)
    }

    /// Replay a batch of historical outcomes into the ledger. Admin.
    pub fn import_games(
        &self,
        identity: &Identity,
        rows: &[ImportRow],
    ) -> Result<IngestReport, ServiceError> {
        self.require_admin(identity)?;
        if self.config.max_import_batch > 0 && rows.len() > self.config.max_import_batch {
            return Err(ServiceError::ImportTooLarge {
                rows: rows.len(),
                max: self.config.max_import_batch,
            });
        }

        let report = BulkImporter::import(&self.ledger, rows, &identity.actor)?;
        info!(applied = report.applied, author = %identity.actor, "import completed");
        Ok(report)
    }

    /// Erase the whole ledger. Admin; irreversible.
    pub fn reset_ledger(&self, identity: &Identity) -> Result<u64, ServiceError> {
        self.require_admin(identity)?;
        let removed = self.ledger.reset_all()?;
        info!(removed, author = %identity.actor, "ledger wiped");
        Ok(removed)
    }

    fn require_member(&self, identity: &Identity) -> Result<(), ServiceError> {
        if identity.role.is_member() {
            Ok(())
        } else {
            Err(ServiceError::Unauthorized)
        }
    }

    fn require_admin(&self, identity: &Identity) -> Result<(), ServiceError> {
        self.require_member(identity)?;
        if identity.role.is_admin() {
            Ok(())
        } else {
            Err(ServiceError::Forbidden)
        }
    }

    fn require_read(&self, identity: &Identity) -> Result<(), ServiceError> {
        if self.config.allow_anonymous_read {
            Ok(())
        } else {
            self.require_member(identity)
        }
    }

    fn require_known(&self, id: &PlayerId) -> Result<(), ServiceError> {
        if self.roster.contains(id)? {
            Ok(())
        } else {
            Err(ServiceError::UnknownPlayer(id.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use baize_ledger::{InMemoryLedger, LedgerError};
    use baize_types::CanonicalPair;

    use crate::roster::InMemoryRoster;

    use super::*;

    fn player(id: &str) -> PlayerId {
        PlayerId::new(id).unwrap()
    }

    fn outcome(winner: &str, loser: &str, balls: u8, on: &str) -> MatchOutcome {
        MatchOutcome {
            winner: player(winner),
            loser: player(loser),
            balls_remaining: balls,
            fouled_on_black: false,
            played_at: on.parse::<NaiveDate>().unwrap(),
        }
    }

    fn service() -> LeagueService<InMemoryLedger, InMemoryRoster> {
        let roster =
            InMemoryRoster::with_players(vec![player("p1"), player("p2"), player("p3")]);
        LeagueService::new(InMemoryLedger::new(), roster)
    }

    #[test]
    fn anonymous_cannot_log_games() {
        let service = service();
        let error = service
            .log_game(&Identity::anonymous(), &outcome("p1", "p2", 3, "2024-01-01"))
            .unwrap_err();
        assert_eq!(error, ServiceError::Unauthorized);
    }

    #[test]
    fn member_logs_a_game_and_is_recorded_as_author() {
        let service = service();
        let revision = service
            .log_game(
                &Identity::member(player("p3")),
                &outcome("p1", "p2", 3, "2024-01-01"),
            )
            .unwrap();

        assert_eq!(revision.author, player("p3"));
        assert_eq!(revision.revision_seq, 0);
    }

    #[test]
    fn unknown_players_are_rejected_before_any_write() {
        let service = service();
        let member = Identity::member(player("p1"));

        let error = service
            .log_game(&member, &outcome("p1", "stranger", 3, "2024-01-01"))
            .unwrap_err();
        assert_eq!(error, ServiceError::UnknownPlayer(player("stranger")));
        assert!(service.match_history(&member).unwrap().is_empty());
    }

    #[test]
    fn edit_of_missing_matchup_passes_the_ledger_error_through() {
        let service = service();
        let matchup = MatchupId::new(
            CanonicalPair::new(player("p1"), player("p2")).unwrap(),
            0,
        );

        let error = service
            .edit_game(
                &Identity::member(player("p1")),
                &matchup,
                &outcome("p1", "p2", 4, "2024-01-01"),
            )
            .unwrap_err();
        assert_eq!(
            error,
            ServiceError::Ledger(LedgerError::MatchupNotFound { matchup })
        );
    }

    #[test]
    fn editing_updates_standings_through_the_latest_revision() {
        let service = service();
        let member = Identity::member(player("p1"));

        let original = service
            .log_game(&member, &outcome("p1", "p2", 3, "2024-01-01"))
            .unwrap();

        let table = service.standings(&Identity::anonymous()).unwrap();
        assert_eq!(
            table.player(&player("p2")).unwrap().totals.balls_remaining_sum,
            3
        );

        service
            .edit_game(
                &member,
                &original.matchup(),
                &outcome("p1", "p2", 5, "2024-01-01"),
            )
            .unwrap();

        let table = service.standings(&Identity::anonymous()).unwrap();
        assert_eq!(
            table.player(&player("p2")).unwrap().totals.balls_remaining_sum,
            5
        );
        // The audit trail still shows both revisions.
        let trail = service.audit_trail(&member).unwrap();
        assert_eq!(trail.len(), 2);
    }

    #[test]
    fn standings_cover_the_whole_roster() {
        let service = service();
        service
            .log_game(
                &Identity::member(player("p1")),
                &outcome("p1", "p2", 3, "2024-01-01"),
            )
            .unwrap();

        let table = service.standings(&Identity::anonymous()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.player(&player("p3")).unwrap().totals.played(), 0);
    }

    #[test]
    fn anonymous_reads_can_be_disabled() {
        let roster = InMemoryRoster::with_players(vec![player("p1"), player("p2")]);
        let config = ServiceConfig {
            allow_anonymous_read: false,
            ..Default::default()
        };
        let service = LeagueService::with_config(InMemoryLedger::new(), roster, config);

        assert_eq!(
            service.match_history(&Identity::anonymous()).unwrap_err(),
            ServiceError::Unauthorized
        );
        assert_eq!(
            service.standings(&Identity::anonymous()).unwrap_err(),
            ServiceError::Unauthorized
        );
        assert!(service
            .match_history(&Identity::member(player("p1")))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn audit_trail_is_never_anonymous() {
        let service = service();
        assert_eq!(
            service.audit_trail(&Identity::anonymous()).unwrap_err(),
            ServiceError::Unauthorized
        );
    }

    #[test]
    fn import_is_admin_only() {
        let service = service();
        let rows = vec![ImportRow {
            winner: player("p1"),
            loser: player("p2"),
            balls_remaining: 2,
            fouled_on_black: false,
            played_at: "2023-09-01".parse::<NaiveDate>().unwrap(),
            rematch_round: 1,
        }];

        assert_eq!(
            service
                .import_games(&Identity::anonymous(), &rows)
                .unwrap_err(),
            ServiceError::Unauthorized
        );
        assert_eq!(
            service
                .import_games(&Identity::member(player("p1")), &rows)
                .unwrap_err(),
            ServiceError::Forbidden
        );

        let admin = Identity::admin(player("p1"));
        let report = service.import_games(&admin, &rows).unwrap();
        assert_eq!(report.applied, 1);
        assert_eq!(service.match_history(&admin).unwrap().len(), 1);
    }

    #[test]
    fn oversized_import_batches_are_rejected() {
        let roster = InMemoryRoster::with_players(vec![player("p1"), player("p2")]);
        let config = ServiceConfig {
            max_import_batch: 1,
            ..Default::default()
        };
        let service = LeagueService::with_config(InMemoryLedger::new(), roster, config);

        let row = ImportRow {
            winner: player("p1"),
            loser: player("p2"),
            balls_remaining: 2,
            fouled_on_black: false,
            played_at: "2023-09-01".parse::<NaiveDate>().unwrap(),
            rematch_round: 1,
        };
        let error = service
            .import_games(&Identity::admin(player("p1")), &[row.clone(), row])
            .unwrap_err();
        assert_eq!(error, ServiceError::ImportTooLarge { rows: 2, max: 1 });
    }

    #[test]
    fn reset_is_admin_only_and_reports_the_count() {
        let service = service();
        let member = Identity::member(player("p1"));
        service
            .log_game(&member, &outcome("p1", "p2", 3, "2024-01-01"))
            .unwrap();
        service
            .log_game(&member, &outcome("p2", "p3", 1, "2024-01-02"))
            .unwrap();

        assert_eq!(
            service.reset_ledger(&member).unwrap_err(),
            ServiceError::Forbidden
        );

        let admin = Identity::admin(player("p1"));
        assert_eq!(service.reset_ledger(&admin).unwrap(), 2);
        assert!(service.match_history(&admin).unwrap().is_empty());
        assert_eq!(service.reset_ledger(&admin).unwrap(), 0);
    }

    #[test]
    fn deleting_a_roster_player_keeps_their_history() {
        let roster = InMemoryRoster::with_players(vec![player("p1"), player("p2")]);
        let ledger = InMemoryLedger::new();
        let service = LeagueService::new(ledger, roster);
        let member = Identity::member(player("p1"));

        service
            .log_game(&member, &outcome("p1", "p2", 3, "2024-01-01"))
            .unwrap();

        // Profile deletion is a roster concern; revisions keep naming
        // the player and standings fall back to a placeholder row.
        service.roster.remove(&player("p2")).unwrap();

        let history = service.match_history(&Identity::anonymous()).unwrap();
        assert_eq!(history.len(), 1);

        let table = service.standings(&Identity::anonymous()).unwrap();
        let ghost = table.player(&player("p2")).unwrap();
        assert!(!ghost.known_player);
        assert_eq!(ghost.totals.losses, 1);
    }
}
