use serde::{Deserialize, Serialize};

use super::{FormActions, StepForm};
use crate::wizard::records::{Certificate, Certificates};
use crate::wizard::steps::Step;
use crate::wizard::validation::{
    check_cap, next_id, push_capped, FieldErrors, WizardError, MAX_CERTIFICATES,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificatesForm {
    pub certificates: Vec<Certificate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CertificateAction {
    Add { title: String, company: String },
    Delete { id: u64 },
}

impl StepForm for CertificatesForm {
    type Record = Certificates;

    const STEP: Step = Step::Certificates;

    fn from_record(record: Option<Certificates>) -> Self {
        CertificatesForm {
            certificates: record
                .unwrap_or_default()
                .0
                .into_iter()
                .filter(|c| !c.is_placeholder())
                .collect(),
        }
    }

    fn to_record(&self) -> Result<Certificates, WizardError> {
        check_cap(&self.certificates, MAX_CERTIFICATES, "certificates")?;
        if self.certificates.is_empty() {
            return Ok(Certificates(vec![Certificate::placeholder()]));
        }
        Ok(Certificates(self.certificates.clone()))
    }
}

impl FormActions for CertificatesForm {
    type Action = CertificateAction;

    fn apply(&mut self, action: CertificateAction) -> Result<(), WizardError> {
        match action {
            CertificateAction::Add { title, company } => {
                let mut errors = FieldErrors::new();
                errors.require("certificate_title", &title, "Certificate title is required");
                errors.require("company_name", &company, "Issuing company is required");
                errors.into_result()?;

                let id = next_id(self.certificates.iter().map(|c| c.id));
                push_capped(
                    &mut self.certificates,
                    Certificate {
                        id,
                        certificate_title: title.trim().to_string(),
                        company_name: company.trim().to_string(),
                    },
                    MAX_CERTIFICATES,
                    "certificates",
                )
            }
            CertificateAction::Delete { id } => {
                let before = self.certificates.len();
                self.certificates.retain(|c| c.id != id);
                if self.certificates.len() == before {
                    return Err(WizardError::NotFound {
                        field: "certificate",
                        position: id,
                    });
                }
                Ok(())
            }
        }
    }
}
