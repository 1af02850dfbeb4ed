//! HRC-20 operations and their canonical payload serialization.
//!
//! Indexers hash the payload document byte-for-byte, so serialization
//! must be deterministic: no whitespace, fields in a fixed order,
//! optional fields emitted only when present, and every value quoted
//! (numerics are treated as arbitrary-precision decimal strings).
//! Serialization walks an explicit field list rather than going through
//! serde, because field order and quoting are consensus-relevant.

/// A single HRC-20 token intent.
///
/// Numeric amounts (`max`, `lim`, `amt`, `pre`) are carried as decimal
/// strings; indexers treat them as arbitrary precision.  The ticker is
/// case-preserved for deploy/mint/transfer/burn and lowercased for
/// list/send (indexer convention).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Hrc20Operation {
    /// Deploy a new token in tick mode.
    Deploy {
        /// Token ticker (case-preserved).
        tick: String,
        /// Maximum supply.
        max: String,
        /// Per-mint limit.
        lim: String,
        /// Optional premine recipient address.
        to: Option<String>,
        /// Optional decimal places.
        dec: Option<u8>,
        /// Optional premine amount.
        pre: Option<String>,
    },
    /// Deploy a new token in issue mode.
    DeployIssue {
        /// Token name.
        name: String,
        /// Maximum supply.
        max: String,
        /// Issuance mode.
        mode: String,
        /// Optional premine recipient address.
        to: Option<String>,
        /// Optional decimal places.
        dec: Option<u8>,
        /// Optional premine amount.
        pre: Option<String>,
    },
    /// Mint tokens to the operator or an explicit recipient.
    Mint {
        /// Token ticker (case-preserved).
        tick: String,
        /// Optional recipient address.
        to: Option<String>,
    },
    /// Transfer tokens to a recipient.
    Transfer {
        /// Token ticker (case-preserved).
        tick: String,
        /// Amount to transfer.
        amt: String,
        /// Recipient address.
        to: String,
    },
    /// Burn tokens.
    Burn {
        /// Token ticker (case-preserved).
        tick: String,
        /// Amount to burn.
        amt: String,
    },
    /// List tokens on the marketplace.
    List {
        /// Token ticker (lowercased on serialization).
        tick: String,
        /// Amount to list.
        amt: String,
    },
    /// Complete a marketplace send.
    Send {
        /// Token ticker (lowercased on serialization).
        tick: String,
    },
}

impl Hrc20Operation {
    /// Return the `op` field value for this operation.
    ///
    /// Both deploy modes serialize as `deploy`; indexers distinguish them
    /// by the presence of `name`/`mod` versus `tick`/`lim`.
    ///
    /// # Returns
    /// The operation name string.
    pub fn op_name(&self) -> &'static str {
        match self {
            Hrc20Operation::Deploy { .. } | Hrc20Operation::DeployIssue { .. } => "deploy",
            Hrc20Operation::Mint { .. } => "mint",
            Hrc20Operation::Transfer { .. } => "transfer",
            Hrc20Operation::Burn { .. } => "burn",
            Hrc20Operation::List { .. } => "list",
            Hrc20Operation::Send { .. } => "send",
        }
    }

    /// Serialize this operation to its canonical payload document.
    ///
    /// # Returns
    /// The whitespace-free ASCII payload, e.g.
    /// `{"p":"hrc-20","op":"mint","tick":"HOOS"}`.
    pub fn to_payload(&self) -> String {
        let mut fields: Vec<(&'static str, String)> = vec![
            ("p", "hrc-20".to_string()),
            ("op", self.op_name().to_string()),
        ];

        match self {
            Hrc20Operation::Deploy { tick, max, lim, to, dec, pre } => {
                fields.push(("tick", tick.clone()));
                fields.push(("max", max.clone()));
                fields.push(("lim", lim.clone()));
                push_optional(&mut fields, "to", to.as_deref());
                push_optional(&mut fields, "dec", dec.map(|d| d.to_string()).as_deref());
                push_optional(&mut fields, "pre", pre.as_deref());
            }
            Hrc20Operation::DeployIssue { name, max, mode, to, dec, pre } => {
                fields.push(("name", name.clone()));
                fields.push(("max", max.clone()));
                fields.push(("mod", mode.clone()));
                push_optional(&mut fields, "to", to.as_deref());
                push_optional(&mut fields, "dec", dec.map(|d| d.to_string()).as_deref());
                push_optional(&mut fields, "pre", pre.as_deref());
            }
            Hrc20Operation::Mint { tick, to } => {
                fields.push(("tick", tick.clone()));
                push_optional(&mut fields, "to", to.as_deref());
            }
            Hrc20Operation::Transfer { tick, amt, to } => {
                fields.push(("tick", tick.clone()));
                fields.push(("amt", amt.clone()));
                fields.push(("to", to.clone()));
            }
            Hrc20Operation::Burn { tick, amt } => {
                fields.push(("tick", tick.clone()));
                fields.push(("amt", amt.clone()));
            }
            Hrc20Operation::List { tick, amt } => {
                fields.push(("tick", tick.to_lowercase()));
                fields.push(("amt", amt.clone()));
            }
            Hrc20Operation::Send { tick } => {
                fields.push(("tick", tick.to_lowercase()));
            }
        }

        let body: Vec<String> = fields
            .iter()
            .map(|(key, value)| format!("\"{}\":\"{}\"", key, value))
            .collect();
        format!("{{{}}}", body.join(","))
    }
}

/// Append an optional field only when it is present.
fn push_optional(fields: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(v) = value {
        fields.push((key, v.to_string()));
    }
}
