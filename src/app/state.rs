//! The session object owning every entity for the lifetime of the shell.
//!
//! Mutations are applied in memory first. Writes to the key-value store and
//! calls to the optional remote backend are best-effort: a failure is logged
//! and the in-memory state stands.

use chrono::{NaiveDate, Utc};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use tally_config::model::DEFAULT_BCRYPT_COST;
use tally_core::{
    remote::UserUpdate,
    storage::{
        load_typed, save_typed, KeyValueStore, CURRENT_USER_KEY, GOAL_KEY, TRANSACTIONS_KEY,
        USERS_KEY,
    },
    AggregationService, CalendarLabels, Clock, GoalService, ProfileUpdate, ProgressService,
    RemoteBackend, TransactionDraft, TransactionService, UserService,
};
use tally_domain::{Goal, Profile, Transaction, User, ViewMode};

use crate::app::{Dashboard, GoalSummary};
use crate::errors::AppError;

pub struct AppState<C: Clock> {
    store: Box<dyn KeyValueStore>,
    remote: Option<Box<dyn RemoteBackend>>,
    clock: C,
    labels: CalendarLabels,
    bcrypt_cost: u32,
    view_mode: ViewMode,
    users: Vec<User>,
    current_user: Option<Profile>,
    transactions: Vec<Transaction>,
    goal: Option<Goal>,
}

impl<C: Clock> AppState<C> {
    /// Restores the session from `store`. Values that can no longer be read
    /// are discarded with a warning.
    pub fn load(store: Box<dyn KeyValueStore>, clock: C) -> Self {
        let users: Vec<User> = load_or_discard(store.as_ref(), USERS_KEY).unwrap_or_default();
        let current_user: Option<Profile> = load_or_discard(store.as_ref(), CURRENT_USER_KEY);
        let transactions: Vec<Transaction> =
            load_or_discard(store.as_ref(), TRANSACTIONS_KEY).unwrap_or_default();
        let goal = load_or_discard::<Goal>(store.as_ref(), GOAL_KEY).filter(|goal| {
            if goal.is_valid() {
                true
            } else {
                warn!(amount = goal.amount, "discarding stored goal with a non-positive amount");
                false
            }
        });

        debug!(
            users = users.len(),
            transactions = transactions.len(),
            goal = goal.is_some(),
            "session restored"
        );

        Self {
            store,
            remote: None,
            clock,
            labels: CalendarLabels::default(),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            view_mode: ViewMode::default(),
            users,
            current_user,
            transactions,
            goal,
        }
    }

    pub fn with_remote(mut self, remote: Box<dyn RemoteBackend>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn with_labels(mut self, labels: CalendarLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn with_view_mode(mut self, view_mode: ViewMode) -> Self {
        self.view_mode = view_mode;
        self
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn labels(&self) -> &CalendarLabels {
        &self.labels
    }

    pub fn set_labels(&mut self, labels: CalendarLabels) {
        self.labels = labels;
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        debug!(%view_mode, "view mode changed");
        self.view_mode = view_mode;
    }

    pub fn current_user(&self) -> Option<&Profile> {
        self.current_user.as_ref()
    }

    pub fn require_user(&self) -> Result<&Profile, AppError> {
        self.current_user.as_ref().ok_or(AppError::NotLoggedIn)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transactions_newest_first(&self) -> Vec<&Transaction> {
        TransactionService::newest_first(&self.transactions)
    }

    pub fn goal(&self) -> Option<&Goal> {
        self.goal.as_ref()
    }

    pub fn total_income(&self) -> f64 {
        TransactionService::total(&self.transactions)
    }

    pub fn register(
        &mut self,
        name: &str,
        username: &str,
        password: &str,
    ) -> Result<Profile, AppError> {
        let mut user =
            UserService::register(&mut self.users, name, username, password, self.bcrypt_cost)?;

        if let Some(remote) = self.remote.as_deref() {
            match remote.create_user(&user.name, &user.username) {
                Ok(remote_user) => {
                    let local_id = user.id;
                    UserService::adopt_remote(&mut user, &remote_user);
                    replace_user(&mut self.users, local_id, &user);
                }
                Err(err) => warn!(error = %err, "remote registration failed; keeping local account"),
            }
        }

        self.persist(USERS_KEY, &self.users);
        let profile = user.profile();
        info!(username = %profile.username, "account registered");
        self.set_current_user(Some(profile.clone()));
        Ok(profile)
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<Profile, AppError> {
        let mut user = UserService::authenticate(&self.users, username, password)?.clone();

        if let Some(remote) = self.remote.as_deref() {
            match remote.get_user(&user.username) {
                Ok(remote_user) => {
                    let local_id = user.id;
                    UserService::adopt_remote(&mut user, &remote_user);
                    if replace_user(&mut self.users, local_id, &user) {
                        self.persist(USERS_KEY, &self.users);
                    }
                }
                Err(err) => warn!(error = %err, "remote user lookup failed; using local account"),
            }
        }

        let profile = user.profile();
        info!(username = %profile.username, "signed in");
        self.set_current_user(Some(profile.clone()));
        self.sync_from_remote();
        Ok(profile)
    }

    pub fn logout(&mut self) {
        if let Some(profile) = self.current_user.as_ref() {
            info!(username = %profile.username, "signed out");
        }
        self.set_current_user(None);
    }

    pub fn update_profile(&mut self, update: &ProfileUpdate) -> Result<Profile, AppError> {
        let id = self.require_user()?.id;
        let mut user = UserService::update_profile(&mut self.users, id, update, self.bcrypt_cost)?;

        if let Some(remote) = self.remote.as_deref() {
            let fields = UserUpdate {
                name: Some(user.name.clone()),
                username: Some(user.username.clone()),
            };
            match remote.update_user(id, &fields) {
                Ok(remote_user) => {
                    UserService::adopt_remote(&mut user, &remote_user);
                    replace_user(&mut self.users, id, &user);
                }
                Err(err) => warn!(error = %err, "remote profile update failed; keeping local edit"),
            }
        }

        self.persist(USERS_KEY, &self.users);
        let profile = user.profile();
        info!(username = %profile.username, "profile updated");
        self.set_current_user(Some(profile.clone()));
        Ok(profile)
    }

    /// Records income stamped with the current instant.
    pub fn add_transaction(
        &mut self,
        description: &str,
        amount: f64,
    ) -> Result<Transaction, AppError> {
        let recorded_at = self.clock.now().with_timezone(&Utc);
        let local =
            TransactionService::add(&mut self.transactions, description, amount, recorded_at)?;
        info!(id = %local.id, amount = local.amount, "income recorded");
        self.persist(TRANSACTIONS_KEY, &self.transactions);

        let draft = TransactionDraft::from(&local);
        let outcome = self
            .remote_session()
            .map(|(remote, user_id)| remote.add_transaction(user_id, &draft));
        match outcome {
            Some(Ok(confirmed)) => {
                TransactionService::replace(&mut self.transactions, local.id, confirmed.clone());
                self.persist(TRANSACTIONS_KEY, &self.transactions);
                debug!(local = %local.id, remote = %confirmed.id, "income confirmed by remote");
                Ok(confirmed)
            }
            Some(Err(err)) => {
                warn!(error = %err, "remote rejected new income; keeping local record");
                Ok(local)
            }
            None => Ok(local),
        }
    }

    /// Removes the record with `id`. Returns `false` when nothing matched.
    pub fn delete_transaction(&mut self, id: Uuid) -> bool {
        let Some(removed) = TransactionService::remove(&mut self.transactions, id) else {
            debug!(%id, "no income record to delete");
            return false;
        };
        info!(id = %removed.id, "income deleted");
        self.persist(TRANSACTIONS_KEY, &self.transactions);

        if let Some((remote, _)) = self.remote_session() {
            match remote.delete_transaction(id) {
                Ok(true) => {}
                Ok(false) => debug!(%id, "remote had no matching record"),
                Err(err) => warn!(error = %err, "remote delete failed"),
            }
        }
        true
    }

    pub fn set_goal(&mut self, amount: f64, deadline: NaiveDate) -> Result<Goal, AppError> {
        let goal = GoalService::create(amount, deadline)?;
        GoalService::ensure_not_past(goal.deadline, self.clock.today())?;
        self.store_goal(goal)
    }

    /// Same as [`AppState::set_goal`] with the deadline given as `YYYY-MM-DD`.
    pub fn set_goal_from_input(&mut self, amount: f64, deadline: &str) -> Result<Goal, AppError> {
        let goal = GoalService::from_input(amount, deadline)?;
        GoalService::ensure_not_past(goal.deadline, self.clock.today())?;
        self.store_goal(goal)
    }

    pub fn remove_goal(&mut self) -> Option<Goal> {
        let removed = self.goal.take();
        if removed.is_some() {
            info!("goal removed");
            self.forget(GOAL_KEY);
        }
        removed
    }

    /// Replaces local transactions and goal with the remote's copies when a
    /// backend is attached and a user is signed in. Returns whether anything
    /// was pulled.
    pub fn sync_from_remote(&mut self) -> bool {
        let Some((remote, user_id)) = self.remote_session() else {
            return false;
        };
        let transactions = remote.get_transactions(user_id);
        let goal = remote.get_goal(user_id);

        let mut pulled = false;
        match transactions {
            Ok(list) => {
                debug!(count = list.len(), "pulled income from remote");
                self.transactions = list;
                self.persist(TRANSACTIONS_KEY, &self.transactions);
                pulled = true;
            }
            Err(err) => warn!(error = %err, "could not fetch income from remote"),
        }
        match goal {
            Ok(Some(goal)) if goal.is_valid() => {
                self.goal = Some(goal);
                self.persist(GOAL_KEY, &goal);
                pulled = true;
            }
            Ok(Some(goal)) => warn!(amount = goal.amount, "ignoring invalid remote goal"),
            Ok(None) => {}
            Err(err) => warn!(error = %err, "could not fetch goal from remote"),
        }
        pulled
    }

    /// Recomputes the dashboard from the full transaction list and the
    /// current instant.
    pub fn dashboard(&self) -> Dashboard<C::Zone> {
        let now = self.clock.now();
        let aggregate =
            AggregationService::aggregate(&self.transactions, self.view_mode, &now, &self.labels);
        let total_income = self.total_income();
        let goal = self.goal.map(|goal| GoalSummary {
            goal,
            progress: ProgressService::progress(&goal, total_income, &now),
        });
        Dashboard {
            aggregate,
            total_income,
            goal,
        }
    }

    fn store_goal(&mut self, goal: Goal) -> Result<Goal, AppError> {
        self.goal = Some(goal);
        info!(amount = goal.amount, deadline = %goal.deadline, "goal set");
        self.persist(GOAL_KEY, &goal);

        let outcome = self
            .remote_session()
            .map(|(remote, user_id)| remote.set_goal(user_id, &goal));
        match outcome {
            Some(Ok(confirmed)) if confirmed.is_valid() => {
                self.goal = Some(confirmed);
                self.persist(GOAL_KEY, &confirmed);
                Ok(confirmed)
            }
            Some(Ok(_)) => {
                warn!("remote returned an invalid goal; keeping local value");
                Ok(goal)
            }
            Some(Err(err)) => {
                warn!(error = %err, "remote goal update failed; keeping local value");
                Ok(goal)
            }
            None => Ok(goal),
        }
    }

    fn remote_session(&self) -> Option<(&dyn RemoteBackend, Uuid)> {
        let remote = self.remote.as_deref()?;
        let user = self.current_user.as_ref()?;
        Some((remote, user.id))
    }

    fn set_current_user(&mut self, profile: Option<Profile>) {
        match &profile {
            Some(profile) => self.persist(CURRENT_USER_KEY, profile),
            None => self.forget(CURRENT_USER_KEY),
        }
        self.current_user = profile;
    }

    fn persist<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match save_typed(self.store.as_ref(), key, value) {
            Ok(()) => debug!(key, "persisted"),
            Err(err) => warn!(key, error = %err, "persist failed; continuing in memory"),
        }
    }

    fn forget(&self, key: &str) {
        if let Err(err) = self.store.remove(key) {
            warn!(key, error = %err, "failed to remove stored value");
        }
    }
}

fn load_or_discard<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    match load_typed(store, key) {
        Ok(value) => value,
        Err(err) => {
            warn!(key, error = %err, "discarding unreadable stored value");
            None
        }
    }
}

fn replace_user(users: &mut [User], id: Uuid, updated: &User) -> bool {
    match users.iter_mut().find(|user| user.id == id) {
        Some(slot) => {
            *slot = updated.clone();
            true
        }
        None => false,
    }
}
