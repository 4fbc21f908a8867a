//! Noyau évaluateur de formules (f64)
//!
//! Organisation interne :
//! - jetons.rs    : découpage paresseux (nombre signé > symbole, espaces ignorés)
//! - variables.rs : registre $nom -> valeur + substitution
//! - expr.rs      : Nombre / Operateur / Parenthese + classification
//! - pile.rs      : pile LIFO
//! - rpn.rs       : shunting-yard -> pile postfixe
//! - eval.rs      : résolution récursive + Evaluateur (API publique)
//! - lecture.rs   : ΣLocal (décimal tronqué de la valeur binaire exacte)
//! - erreur.rs    : ErreurFormule

pub mod erreur;
pub mod eval;
pub mod expr;
pub mod jetons;
pub mod lecture;
pub mod pile;
pub mod rpn;
pub mod variables;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurFormule;
pub use eval::{DemarcheNoyau, Evaluateur};
