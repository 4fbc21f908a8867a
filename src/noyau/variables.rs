//! Registre des variables (`$nom` -> valeur).
//!
//! Seul état qui survit entre deux évaluations. La lecture ne le modifie jamais :
//! un nom inconnu vaut 0 (défaut silencieux, simple avertissement dans le journal).

use std::collections::BTreeMap;

/// Sigile qui annonce une référence de variable dans une formule.
pub const SIGILE_VARIABLE: char = '$';

/// Fragment après substitution : soit le texte brut, soit une valeur déjà résolue.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fragment<'a> {
    Brut(&'a str),
    Valeur(f64),
}

#[derive(Clone, Debug, Default)]
pub struct Registre {
    valeurs: BTreeMap<String, f64>,
}

impl Registre {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute ou remplace.
    pub fn enregistrer(&mut self, nom: impl Into<String>, valeur: f64) {
        let nom = nom.into();
        log::info!("variable ${nom} = {valeur}");
        self.valeurs.insert(nom, valeur);
    }

    pub fn retirer(&mut self, nom: &str) -> Option<f64> {
        self.valeurs.remove(nom)
    }

    pub fn vider(&mut self) {
        self.valeurs.clear();
    }

    pub fn valeur(&self, nom: &str) -> Option<f64> {
        self.valeurs.get(nom).copied()
    }

    /// Par ordre de nom.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.valeurs.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.valeurs.len()
    }

    pub fn est_vide(&self) -> bool {
        self.valeurs.is_empty()
    }

    /// Remplace `$nom` par sa valeur (0 si inconnu). Les autres fragments passent tels quels.
    pub fn substituer<'a>(&self, jeton: &'a str) -> Fragment<'a> {
        let Some(nom) = jeton.strip_prefix(SIGILE_VARIABLE) else {
            return Fragment::Brut(jeton);
        };

        match self.valeur(nom) {
            Some(v) => Fragment::Valeur(v),
            None => {
                log::warn!("variable ${nom} non enregistrée : remplacée par 0");
                Fragment::Valeur(0.0)
            }
        }
    }
}
