// 🧾 Collaborator Record - the single entity of the register
// On-disk keys are Portuguese and kept as-is for compatibility with existing files

use serde::{Deserialize, Serialize};

/// One collaborator's name, birth date, payment date and paid flag.
///
/// Dates are kept as the `DD/MM/YYYY` text the user typed; validation
/// happens before a record is built (see `validation::validate_record`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaboratorRecord {
    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "nascimento")]
    pub birth_date: String,

    /// Payment date, stored under `cadastro`.
    #[serde(rename = "cadastro")]
    pub payment_date: String,

    #[serde(rename = "pago")]
    pub paid: bool,
}

impl CollaboratorRecord {
    pub fn new(name: &str, birth_date: &str, payment_date: &str, paid: bool) -> Self {
        CollaboratorRecord {
            name: name.to_string(),
            birth_date: birth_date.to_string(),
            payment_date: payment_date.to_string(),
            paid,
        }
    }

    pub fn paid_label(&self) -> &'static str {
        if self.paid {
            "Yes"
        } else {
            "No"
        }
    }
}
