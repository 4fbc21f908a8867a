//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de l’évaluateur (entrée, résultat, erreur, digits, démarche,
//! registre de variables) et offrir des opérations simples (C/CLR/AC, variables)
//! sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation de formule ici (c’est vue.rs qui appelle le noyau).
//! - Le registre de variables vit dans l’Evaluateur : c’est le seul état du noyau
//!   qui survit d’une évaluation à l’autre.

use calculatrice_formules::noyau::{DemarcheNoyau, Evaluateur};

/// Précision ΣLocal par défaut (lecture décimale tronquée).
const DIGITS_DEFAUT: usize = 20;

/// Garde-fou : on borne la précision (anti-abus / anti-gel).
pub const DIGITS_MAX: usize = 200;

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String,    // rendu du f64 (inf / NaN inclus)
    pub lecture: String,     // ΣLocal (décimal tronqué)
    pub erreur: String,      // message d’erreur (si analyse/éval échoue)
    pub lecture_dispo: bool, // false si NaN / ∞ / vide

    // --- démarche (panneau d’explication) ---
    pub demarche: DemarcheNoyau,

    // --- paramètres ---
    pub digits: usize, // précision ΣLocal

    // --- noyau (registre de variables inclus) ---
    pub evaluateur: Evaluateur,

    // --- saisie d’une variable ---
    pub nom_variable: String,
    pub valeur_variable: f64,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            lecture: String::new(),
            erreur: String::new(),
            lecture_dispo: false, // au démarrage : rien à lire
            demarche: DemarcheNoyau::default(),
            digits: DIGITS_DEFAUT,
            evaluateur: Evaluateur::new(),
            nom_variable: String::new(),
            valeur_variable: 0.0,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + variables + digits par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.evaluateur.registre_mut().vider();
        self.nom_variable.clear();
        self.valeur_variable = 0.0;
        self.digits = DIGITS_DEFAUT;
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    fn clear_demarche(&mut self) {
        self.demarche = DemarcheNoyau::default();
    }

    /// CLR : effacer résultats + erreur + démarche (sans toucher à l’entrée ni aux variables).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.lecture.clear();
        self.erreur.clear();
        self.lecture_dispo = false;
        self.clear_demarche();
        self.focus_entree = true;
    }

    /// Utilitaire : placer une erreur.
    ///
    /// Choix UX :
    /// - On CONSERVE `resultat` (dernier résultat) pour ne pas “effacer l’écran” sur une faute.
    /// - On coupe ΣLocal + démarche.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();

        self.lecture.clear();
        self.lecture_dispo = false;

        self.clear_demarche();

        self.focus_entree = true;
    }

    /// Utilitaire : déposer un résultat complet (valeur + lecture optionnelle + démarche).
    pub fn set_resultats(
        &mut self,
        resultat: impl Into<String>,
        lecture: Option<String>,
        demarche: DemarcheNoyau,
    ) {
        self.erreur.clear();
        self.resultat = resultat.into();
        self.demarche = demarche;

        if let Some(v) = lecture {
            self.lecture_dispo = true;
            self.lecture = v;
        } else {
            self.lecture_dispo = false;
            self.lecture.clear();
        }

        self.focus_entree = true;
    }

    /// Garde-fou : limite digits (évite abus / gel plus tard).
    pub fn set_digits(&mut self, digits: usize) {
        self.digits = digits.clamp(0, DIGITS_MAX);
        self.focus_entree = true;
    }

    /* ------------------------ Variables ------------------------ */

    /// Enregistre (nom_variable, valeur_variable) dans le registre du noyau.
    /// Nom accepté : lettres / chiffres / '_' (ce que le découpage lit après '$').
    pub fn enregistrer_variable(&mut self) {
        let nom = self.nom_variable.trim().trim_start_matches('$').to_string();

        if nom.is_empty() {
            self.set_erreur("Nom de variable vide");
            return;
        }
        if !nom.chars().all(|c| c.is_alphanumeric() || c == '_') {
            self.set_erreur(format!("Nom de variable invalide : '{nom}'"));
            return;
        }

        self.evaluateur.enregistrer_variable(nom, self.valeur_variable);
        self.nom_variable.clear();
        self.erreur.clear();
        self.focus_entree = true;
    }

    pub fn retirer_variable(&mut self, nom: &str) {
        self.evaluateur.registre_mut().retirer(nom);
        self.focus_entree = true;
    }

    /// Copie (nom, valeur) triée par nom : la vue peut modifier le registre en itérant.
    pub fn variables(&self) -> Vec<(String, f64)> {
        self.evaluateur
            .registre()
            .iter()
            .map(|(n, v)| (n.to_string(), v))
            .collect()
    }
}
