//! Erreurs du noyau.
//!
//! Toute erreur interrompt l’évaluation en cours (pas de résultat partiel).
//! La division par zéro n’en fait PAS partie : elle suit IEEE-754 (±∞, NaN).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurFormule {
    /// Fragment qui n’est ni un symbole connu, ni un nombre, ni une variable.
    #[error("jeton malformé : '{0}'")]
    JetonMalforme(String),

    /// ')' sans '(' correspondante, ou '(' jamais refermée.
    #[error("parenthèses non appariées")]
    ParenthesesDesequilibrees,

    /// Un opérateur ne trouve pas ses deux opérandes (ou formule vide).
    #[error("pile vide : opérande manquant")]
    PileVide,

    /// Il reste des termes sur la pile une fois le résultat obtenu (ex: "2 -4").
    #[error("expression invalide : {restants} terme(s) sans opérateur")]
    OperandesExcedentaires { restants: usize },

    /// Garde-fou : résolution récursive trop profonde.
    #[error("imbrication trop profonde (limite : {limite})")]
    ImbricationExcessive { limite: usize },
}

pub type Resultat<T> = Result<T, ErreurFormule>;
