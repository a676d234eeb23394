//! Flow variants and step sequencing
//!
//! The wizard is a branching sequence: a single visitor chooses to register
//! as a buyer or as one of two seller sub-types, and each choice selects a
//! different ordered list of steps. The three paths are modeled as a tagged
//! union (`FlowVariant`), each carrying its own static step table, so that
//! step identity and step count are exhaustive lookups instead of ad hoc
//! arithmetic.
//!
//! # Step tables
//!
//! | Flow           | Steps                                                                |
//! |----------------|----------------------------------------------------------------------|
//! | Buyer          | AccountType, PersonalInfo, Credentials                               |
//! | SellerNatural  | AccountType, PersonType, StoreInfo, PersonalInfo, Credentials        |
//! | SellerJuridica | AccountType, PersonType, StoreInfo, CompanyInfo, Representative, Credentials |

use serde::{Deserialize, Serialize};

/// Account type chosen on the first wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Registers a buyer account
    Buyer,
    /// Registers a seller account; requires a person type selection
    Seller,
}

/// Seller sub-type chosen on the second wizard step
///
/// Meaningless, and ignored, while the role is not `Seller`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonType {
    /// A natural person selling under their own name
    Natural,
    /// A legal entity (persona jurídica) with a company and representative
    Juridica,
}

/// One of the three mutually exclusive registration paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowVariant {
    Buyer,
    SellerNatural,
    SellerJuridica,
}

/// The semantic meaning of a step number within a flow
///
/// Distinct from the numeric position: `Credentials` is step 3 for a buyer
/// but step 5 or 6 for a seller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StepIdentity {
    /// Buyer-or-seller selection
    AccountType,
    /// Natural-or-juridica selection (sellers only)
    PersonType,
    /// Store name, category, and store address
    StoreInfo,
    /// Personal names, document, phone, and personal address
    PersonalInfo,
    /// Company name, NIT, contact data, and company address
    CompanyInfo,
    /// Legal representative names, document, phone, and email
    Representative,
    /// Email and password creation, acceptance checks, billing selection
    Credentials,
}

impl StepIdentity {
    /// Whether this step is one of the branch-selection steps excluded from
    /// the visible progress bar
    pub fn is_branch_selection(&self) -> bool {
        matches!(self, StepIdentity::AccountType | StepIdentity::PersonType)
    }
}

const BUYER_STEPS: &[StepIdentity] = &[
    StepIdentity::AccountType,
    StepIdentity::PersonalInfo,
    StepIdentity::Credentials,
];

const SELLER_NATURAL_STEPS: &[StepIdentity] = &[
    StepIdentity::AccountType,
    StepIdentity::PersonType,
    StepIdentity::StoreInfo,
    StepIdentity::PersonalInfo,
    StepIdentity::Credentials,
];

const SELLER_JURIDICA_STEPS: &[StepIdentity] = &[
    StepIdentity::AccountType,
    StepIdentity::PersonType,
    StepIdentity::StoreInfo,
    StepIdentity::CompanyInfo,
    StepIdentity::Representative,
    StepIdentity::Credentials,
];

impl FlowVariant {
    /// Resolves the flow variant from the two branch selectors
    ///
    /// Returns `None` while the selection is still incomplete: no role yet,
    /// or a seller who has not picked a person type. A person type carried
    /// over from an abandoned seller branch is ignored for buyers.
    pub fn resolve(role: Option<Role>, person_type: Option<PersonType>) -> Option<FlowVariant> {
        match role? {
            Role::Buyer => Some(FlowVariant::Buyer),
            Role::Seller => match person_type? {
                PersonType::Natural => Some(FlowVariant::SellerNatural),
                PersonType::Juridica => Some(FlowVariant::SellerJuridica),
            },
        }
    }

    /// The ordered step table for this flow
    pub fn steps(&self) -> &'static [StepIdentity] {
        match self {
            FlowVariant::Buyer => BUYER_STEPS,
            FlowVariant::SellerNatural => SELLER_NATURAL_STEPS,
            FlowVariant::SellerJuridica => SELLER_JURIDICA_STEPS,
        }
    }

    /// Total number of steps in this flow (3, 5, or 6)
    pub fn total_steps(&self) -> u8 {
        self.steps().len() as u8
    }

    /// The final step of this flow, at which submission is attempted
    pub fn terminal_step(&self) -> u8 {
        self.total_steps()
    }

    /// Whether `step` is the terminal step of this flow
    pub fn is_terminal(&self, step: u8) -> bool {
        step == self.terminal_step()
    }

    /// The identity of the given 1-based step
    ///
    /// Total over all step numbers: out-of-range input saturates to the
    /// nearest table entry rather than panicking.
    pub fn step_identity(&self, step: u8) -> StepIdentity {
        let table = self.steps();
        let index = (step.max(1) as usize - 1).min(table.len() - 1);
        table[index]
    }

    /// Advances by one step, clamped to the terminal step
    pub fn next_step(&self, step: u8) -> u8 {
        (step + 1).min(self.terminal_step())
    }

    /// Retreats by one step, clamped to the first step
    ///
    /// Independent of the flow: every flow starts at step 1.
    pub fn prev_step(step: u8) -> u8 {
        step.saturating_sub(1).max(1)
    }

    /// Clamps an arbitrary step counter into this flow's valid range
    ///
    /// Used when the flow variant changes under an already-advanced counter
    /// (a seller backtracking and switching person type).
    pub fn clamp_step(&self, step: u8) -> u8 {
        step.clamp(1, self.terminal_step())
    }

    /// Number of leading branch-selection steps in this flow
    fn branch_selection_steps(&self) -> u8 {
        self.steps()
            .iter()
            .take_while(|s| s.is_branch_selection())
            .count() as u8
    }

    /// The (adjusted step, adjusted total) pair shown on the progress bar
    ///
    /// Branch-selection steps are excluded from both numbers so the bar
    /// reflects only data-entry steps. Returns `None` while the visitor is
    /// still on a branch-selection step; the bar must not render at all.
    pub fn display_progress(&self, step: u8) -> Option<(u8, u8)> {
        let hidden = self.branch_selection_steps();
        if step <= hidden {
            return None;
        }
        Some((step - hidden, self.total_steps() - hidden))
    }
}
