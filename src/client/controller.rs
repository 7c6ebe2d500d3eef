//! Keeps one page of expenses in sync with the server.

use crate::{
    client::{
        ClientError, ExpenseApi, ExpenseForm, PageIndicator, Preferences, PreferencesFile,
        Session, page_indicators,
    },
    database_id::ExpenseId,
    expense::{DeleteConfirmation, Expense},
};

/// The state behind an expense list screen.
///
/// Page changes replace the list with what the server returns. Creating,
/// editing and deleting patch the loaded page and the totals in place instead
/// of reloading.
#[derive(Debug)]
pub struct ExpenseList<A> {
    api: A,
    preferences_file: PreferencesFile,
    preferences: Preferences,
    expenses: Vec<Expense>,
    current_page: u64,
    total_pages: u64,
    total_items: u64,
    total_amount: f64,
    edit_id: Option<ExpenseId>,
}

impl<A: ExpenseApi> ExpenseList<A> {
    /// Create an empty list that reads the page size from `preferences_file`.
    ///
    /// # Errors
    /// Returns [ClientError::Preferences] if the preferences file exists but cannot be read.
    pub fn new(api: A, preferences_file: PreferencesFile) -> Result<Self, ClientError> {
        let preferences = preferences_file.load()?;

        Ok(Self {
            api,
            preferences_file,
            preferences,
            expenses: Vec::new(),
            current_page: 1,
            total_pages: 0,
            total_items: 0,
            total_amount: 0.0,
            edit_id: None,
        })
    }

    /// The expenses on the loaded page, in display order.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// The loaded page number, starting from 1.
    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    /// The number of pages, counting local changes since the last load.
    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// The number of expenses the user has, counting local changes since the last load.
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// The sum over all of the user's expenses, counting local changes since the last load.
    pub fn total_amount(&self) -> f64 {
        self.total_amount
    }

    /// The number of expenses requested per page.
    pub fn items_per_page(&self) -> u64 {
        self.preferences.items_per_page
    }

    /// The expense being edited, if any.
    pub fn edit_id(&self) -> Option<ExpenseId> {
        self.edit_id
    }

    /// The sum of the amounts on the loaded page only.
    pub fn page_total(&self) -> f64 {
        self.expenses.iter().map(|expense| expense.amount).sum()
    }

    /// The navigation bar for the loaded page.
    pub fn page_indicators(&self, max_links: u64) -> Vec<PageIndicator> {
        page_indicators(self.current_page, self.total_pages, max_links)
    }

    /// Fetch `page` and replace the local list with it.
    ///
    /// # Errors
    /// Returns the [ClientError] from the server. The local list is unchanged on error.
    pub async fn load_page(&mut self, session: &Session, page: u64) -> Result<(), ClientError> {
        session.ensure_active()?;

        let loaded = self
            .api
            .list(session, page, self.preferences.items_per_page)
            .await?;

        self.expenses = loaded.expenses;
        self.current_page = loaded.current_page;
        self.total_pages = loaded.total_pages;
        self.total_items = loaded.total_items;
        self.total_amount = loaded.total_amount;

        Ok(())
    }

    /// Fetch the current page again.
    ///
    /// # Errors
    /// See [ExpenseList::load_page].
    pub async fn refresh(&mut self, session: &Session) -> Result<(), ClientError> {
        self.load_page(session, self.current_page).await
    }

    /// Load the following page. Does nothing on the last page.
    ///
    /// # Errors
    /// See [ExpenseList::load_page].
    pub async fn next_page(&mut self, session: &Session) -> Result<(), ClientError> {
        if self.current_page >= self.total_pages {
            return Ok(());
        }

        self.load_page(session, self.current_page + 1).await
    }

    /// Load the preceding page. Does nothing on the first page.
    ///
    /// # Errors
    /// See [ExpenseList::load_page].
    pub async fn previous_page(&mut self, session: &Session) -> Result<(), ClientError> {
        if self.current_page <= 1 {
            return Ok(());
        }

        self.load_page(session, self.current_page - 1).await
    }

    /// Change the page size, save it and go back to the first page.
    ///
    /// # Errors
    /// Returns [ClientError::Validation] if `items_per_page` is zero,
    /// [ClientError::Preferences] if it cannot be saved, or the error from
    /// loading the first page.
    pub async fn set_items_per_page(
        &mut self,
        session: &Session,
        items_per_page: u64,
    ) -> Result<(), ClientError> {
        if items_per_page == 0 {
            return Err(ClientError::Validation(
                "items per page must be at least 1".to_owned(),
            ));
        }

        let preferences = Preferences { items_per_page };
        self.preferences_file.save(&preferences)?;
        self.preferences = preferences;

        self.load_page(session, 1).await
    }

    /// Start editing the loaded expense with `id` and return a form filled with it.
    ///
    /// Returns `None` if the expense is not on the loaded page.
    pub fn begin_edit(&mut self, id: ExpenseId) -> Option<ExpenseForm> {
        let expense = self.expenses.iter().find(|expense| expense.id == id)?;
        self.edit_id = Some(id);

        Some(ExpenseForm::from_expense(expense))
    }

    /// Stop editing without saving.
    pub fn cancel_edit(&mut self) {
        self.edit_id = None;
    }

    /// Save `form` as a new expense, or as the expense being edited.
    ///
    /// A new expense is put at the top of the list. An edited expense is
    /// replaced where it is and editing stops.
    ///
    /// # Errors
    /// Returns [ClientError::Validation] for an invalid form without contacting
    /// the server, or the [ClientError] from the server.
    pub async fn submit(
        &mut self,
        session: &Session,
        form: &ExpenseForm,
    ) -> Result<Expense, ClientError> {
        session.ensure_active()?;

        match self.edit_id {
            Some(id) => {
                let update = form.validate_update()?;
                let updated = self.api.update(session, id, &update).await?;

                if let Some(slot) = self.expenses.iter_mut().find(|expense| expense.id == id) {
                    self.total_amount += updated.amount - slot.amount;
                    *slot = updated.clone();
                }
                self.edit_id = None;

                Ok(updated)
            }
            None => {
                let new_expense = form.validate()?;
                let created = self.api.create(session, &new_expense).await?;
                self.expenses.insert(0, created.clone());
                self.total_amount += created.amount;
                self.set_total_items(self.total_items + 1);

                Ok(created)
            }
        }
    }

    /// Delete the expense with `id` and drop it from the list.
    ///
    /// # Errors
    /// Returns the [ClientError] from the server. The list is unchanged on error.
    pub async fn delete(
        &mut self,
        session: &Session,
        id: ExpenseId,
    ) -> Result<DeleteConfirmation, ClientError> {
        session.ensure_active()?;

        let confirmation = self.api.delete(session, id).await?;
        if let Some(index) = self.expenses.iter().position(|expense| expense.id == id) {
            let removed = self.expenses.remove(index);
            self.total_amount -= removed.amount;
        }
        self.set_total_items(self.total_items.saturating_sub(1));
        if self.edit_id == Some(id) {
            self.edit_id = None;
        }

        Ok(confirmation)
    }

    fn set_total_items(&mut self, total_items: u64) {
        self.total_items = total_items;
        self.total_pages = total_items.div_ceil(self.preferences.items_per_page);
    }
}
