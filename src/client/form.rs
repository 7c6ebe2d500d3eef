//! The fields a user fills in to create or change an expense.

use std::{fmt::Display, str::FromStr};

use crate::{
    client::ClientError,
    expense::{Expense, ExpenseUpdate, NewExpense},
};

/// The categories a user can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Groceries, eating out and drinks.
    Food,
    /// Fuel, fares and parking.
    Transport,
    /// Movies, games and events.
    Entertainment,
    /// Power, water, internet and phone.
    Utilities,
    /// Anything else.
    Others,
}

impl Category {
    /// Every category, in the order they are offered.
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Utilities,
        Category::Others,
    ];

    /// The name the server stores for the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Others => "Others",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s.trim())
            .ok_or_else(|| ClientError::Validation(format!("unknown category \"{s}\"")))
    }
}

/// The text a user entered for an expense.
///
/// `amount` is kept as the raw text so that a half typed number is not lost.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseForm {
    /// What the money was spent on.
    pub description: String,
    /// The amount as typed.
    pub amount: String,
    /// The chosen category, if any.
    pub category: Option<Category>,
}

impl ExpenseForm {
    /// Fill the form with an existing expense, e.g. to edit it.
    ///
    /// A category the client does not know is left unselected.
    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            description: expense.description.clone(),
            amount: expense.amount.to_string(),
            category: expense.category.parse().ok(),
        }
    }

    /// Check the form and turn it into a request body.
    ///
    /// # Errors
    /// Returns [ClientError::Validation] if the description is blank, the
    /// amount is not a positive number or no category was chosen.
    pub fn validate(&self) -> Result<NewExpense, ClientError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ClientError::Validation(
                "description must not be empty".to_owned(),
            ));
        }

        let amount = self
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite() && *amount > 0.0)
            .ok_or_else(|| ClientError::Validation("amount must be a positive number".to_owned()))?;

        let category = self
            .category
            .ok_or_else(|| ClientError::Validation("choose a category".to_owned()))?;

        Ok(NewExpense {
            description: description.to_owned(),
            amount,
            category: category.to_string(),
            date: None,
        })
    }

    /// Check the form and turn it into an update that replaces every editable field.
    ///
    /// # Errors
    /// See [ExpenseForm::validate].
    pub fn validate_update(&self) -> Result<ExpenseUpdate, ClientError> {
        let expense = self.validate()?;

        Ok(ExpenseUpdate {
            description: Some(expense.description),
            amount: Some(expense.amount),
            category: Some(expense.category),
            date: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{
        UserID,
        client::{Category, ClientError, ExpenseForm},
        expense::Expense,
    };

    fn form(description: &str, amount: &str, category: Option<Category>) -> ExpenseForm {
        ExpenseForm {
            description: description.to_owned(),
            amount: amount.to_owned(),
            category,
        }
    }

    #[test]
    fn parses_known_categories() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn rejects_unknown_category() {
        assert!(matches!(
            "Crypto".parse::<Category>(),
            Err(ClientError::Validation(_))
        ));
    }

    #[test]
    fn valid_form_becomes_new_expense() {
        let expense = form(" Coffee ", "4.50", Some(Category::Food))
            .validate()
            .unwrap();

        assert_eq!(expense.description, "Coffee");
        assert_eq!(expense.amount, 4.5);
        assert_eq!(expense.category, "Food");
        assert_eq!(expense.date, None);
    }

    #[test]
    fn rejects_invalid_forms() {
        let cases = [
            form("", "4.5", Some(Category::Food)),
            form("Coffee", "", Some(Category::Food)),
            form("Coffee", "four", Some(Category::Food)),
            form("Coffee", "0", Some(Category::Food)),
            form("Coffee", "-2", Some(Category::Food)),
            form("Coffee", "4.5", None),
        ];

        for case in cases {
            assert!(
                matches!(case.validate(), Err(ClientError::Validation(_))),
                "{case:?} should be rejected"
            );
        }
    }

    #[test]
    fn fills_form_from_expense() {
        let expense = Expense {
            id: 1,
            owner: UserID::new(1),
            description: "Bus".to_owned(),
            amount: 3.2,
            category: "Transport".to_owned(),
            date: datetime!(2025-01-01 0:00 UTC),
        };

        assert_eq!(
            ExpenseForm::from_expense(&expense),
            form("Bus", "3.2", Some(Category::Transport))
        );
    }

    #[test]
    fn update_replaces_every_editable_field() {
        let update = form("Bus", "3.2", Some(Category::Transport))
            .validate_update()
            .unwrap();

        assert_eq!(update.description.as_deref(), Some("Bus"));
        assert_eq!(update.amount, Some(3.2));
        assert_eq!(update.category.as_deref(), Some("Transport"));
        assert_eq!(update.date, None);
    }
}
