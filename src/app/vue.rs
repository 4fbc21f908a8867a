// src/app/vue.rs
//
// Vue (UI egui): natif + web
// ---------------------------
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue, Backspace efface (quand le champ est focus) ;
//   curseur en fin d’entrée derrière un $nom : la référence part en entier
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Panneau variables : $nom = valeur, réutilisables d’une évaluation à l’autre
//
// Espaces : les opérateurs sont insérés entourés d’espaces ("2 - 4"),
// le bouton ± colle le signe au nombre ("2 - -4"). Sans espace, "2 -4" se lit
// comme deux nombres.

use eframe::egui;

use super::etat::{AppCalc, DIGITS_MAX};
use calculatrice_formules::noyau::lecture::lecture_tronquee;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice formules");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_variables(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultats(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée :");

        // IMPORTANT : id stable + focus contrôlé
        let id = ui.make_persistent_id("entree_edit");

        // Backspace sur une référence $nom finale : traité AVANT le TextEdit,
        // sur le texte non modifié, et la touche est consommée.
        let backspace = ui.input(|i| i.key_pressed(egui::Key::Backspace));
        if backspace && ui.memory(|m| m.has_focus(id)) {
            let curseur = egui::text_edit::TextEditState::load(ui.ctx(), id)
                .and_then(|etat| etat.cursor.char_range())
                .map(|r| (r.primary.index, r.secondary.index));
            if self.backspace_clavier(curseur) {
                ui.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Backspace));
                self.focus_entree = true;
            }
        }

        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: (2 + 3) * 4, 2^3^2, ($a + 4) * 4, +2 - -4")
                .id(id)
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.eval_via_noyau();
            self.focus_entree = true;
        }

        ui.add_space(6.0);

        // Actions + ΣLocal
        ui.horizontal(|ui| {
            // Contrat: C = entrée seulement ; CLR = résultats seulement ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(
                ui,
                "CLR",
                "Efface résultat + erreur + démarche",
                Action::ClearResultats,
            );
            self.bouton_action(
                ui,
                "AC",
                "Remise à zéro totale (variables comprises)",
                Action::ResetTotal,
            );

            ui.separator();

            ui.label("ΣLocal :");
            let mut d = self.digits as u32;
            let resp = ui.add(
                egui::DragValue::new(&mut d)
                    .speed(1)
                    .range(0..=DIGITS_MAX as u32)
                    .suffix(" chiffres"),
            );
            if resp.changed() {
                self.set_digits(d as usize);
            }
        });

        ui.add_space(8.0);

        // Touches rapides + "="
        ui.horizontal_wrapped(|ui| {
            self.bouton_insert(ui, "(", "(", InsertKind::OpenParen);
            self.bouton_insert(ui, ")", ")", InsertKind::CloseParen);

            self.bouton_insert(ui, "+", "+", InsertKind::Op);
            self.bouton_insert(ui, "-", "-", InsertKind::Op);
            self.bouton_insert(ui, "*", "*", InsertKind::Op);
            self.bouton_insert(ui, "/", "/", InsertKind::Op);
            self.bouton_insert(ui, "^", "^", InsertKind::Op);

            ui.separator();

            self.bouton_insert(ui, "±", "-", InsertKind::Signe);
            self.bouton_insert(ui, "$", "$", InsertKind::Variable);

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 32.0], egui::Button::new("="));
            if eq.clicked() {
                self.eval_via_noyau();
                self.focus_entree = true;
            }
        });

        ui.add_space(8.0);

        // Pavé numérique
        self.ui_pave_numerique(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique_formules")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "7", "7", InsertKind::Digit);
                self.bouton_insert(ui, "8", "8", InsertKind::Digit);
                self.bouton_insert(ui, "9", "9", InsertKind::Digit);
                self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);
                ui.end_row();

                self.bouton_insert(ui, "4", "4", InsertKind::Digit);
                self.bouton_insert(ui, "5", "5", InsertKind::Digit);
                self.bouton_insert(ui, "6", "6", InsertKind::Digit);
                self.bouton_insert(ui, "/", "/", InsertKind::Op);
                ui.end_row();

                self.bouton_insert(ui, "1", "1", InsertKind::Digit);
                self.bouton_insert(ui, "2", "2", InsertKind::Digit);
                self.bouton_insert(ui, "3", "3", InsertKind::Digit);
                self.bouton_insert(ui, ".", ".", InsertKind::Digit);
                ui.end_row();

                self.bouton_insert(ui, "0", "0", InsertKind::Digit);
                ui.label("");
                ui.label("");
                ui.label("");
                ui.end_row();
            });
    }

    /// Backspace “intelligent” : retire d’un coup une référence $nom finale.
    fn backspace_entree(&mut self) {
        if self.entree.is_empty() {
            return;
        }

        // Retire espaces finaux
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }

        if let Some(debut) = fin_variable(&self.entree) {
            self.entree.truncate(debut);
        } else {
            // Sinon : un caractère
            self.entree.pop();
        }

        while self.entree.ends_with(' ') {
            self.entree.pop();
        }
    }

    /// Backspace clavier sur `curseur` (indices en caractères : primaire, secondaire).
    /// Retire la référence $nom entière seulement si le curseur, sans sélection,
    /// est en fin d’entrée juste derrière elle. false : Backspace reste au TextEdit.
    fn backspace_clavier(&mut self, curseur: Option<(usize, usize)>) -> bool {
        let fin = self.entree.chars().count();
        if curseur != Some((fin, fin)) || fin_variable(&self.entree).is_none() {
            return false;
        }
        self.backspace_entree();
        true
    }

    fn ui_variables(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Variables")
            .default_open(true)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label("$");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.nom_variable)
                            .desired_width(120.0)
                            .hint_text("nom")
                            .id_salt("nom_variable_edit"),
                    );
                    ui.label("=");
                    ui.add(egui::DragValue::new(&mut self.valeur_variable).speed(0.1));

                    if ui.button("Enregistrer").clicked() {
                        self.enregistrer_variable();
                    }
                });

                let variables = self.variables();
                if variables.is_empty() {
                    ui.monospace("aucune (une variable inconnue vaut 0)");
                    return;
                }

                egui::Grid::new("liste_variables")
                    .num_columns(3)
                    .spacing([6.0, 4.0])
                    .show(ui, |ui| {
                        for (nom, valeur) in variables {
                            let reference = format!("${nom}");
                            if ui
                                .button(reference.as_str())
                                .on_hover_text("Insérer dans l’entrée")
                                .clicked()
                            {
                                self.inserer(&reference, InsertKind::Variable);
                            }
                            ui.monospace(format!("= {valeur}"));
                            if ui.small_button("✕").on_hover_text("Retirer").clicked() {
                                self.retirer_variable(&nom);
                            }
                            ui.end_row();
                        }
                    });
            });
    }

    fn ui_resultats(&mut self, ui: &mut egui::Ui) {
        ui.label("Résultat :");
        Self::champ_monospace(ui, "resultat_out", &self.resultat, 1);

        ui.add_space(6.0);

        ui.label("ΣLocal :");
        if self.lecture_dispo {
            Self::champ_monospace(ui, "socal_out", &self.lecture, 2);
        } else {
            ui.monospace("indisponible");
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "Postfixe", "demarche_postfixe", &self.demarche.postfixe);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, kind: InsertKind) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if resp.clicked() {
            self.inserer(to_insert, kind);
        }
    }

    fn inserer(&mut self, to_insert: &str, kind: InsertKind) {
        if to_insert.is_empty() {
            return;
        }

        match kind {
            InsertKind::CloseParen => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                self.entree.push_str(to_insert);
            }
            InsertKind::OpenParen | InsertKind::Signe | InsertKind::Variable => {
                // séparer d’un terme précédent (nombre, variable, ')')
                let last = self.entree.chars().rev().find(|c| !c.is_whitespace());
                if let Some(c) = last {
                    if c.is_alphanumeric() || c == '_' || c == '.' || c == ')' {
                        self.entree.push(' ');
                    }
                }
                if kind == InsertKind::Signe
                    && !self.entree.is_empty()
                    && !self.entree.ends_with(char::is_whitespace)
                    && !self.entree.ends_with('(')
                {
                    self.entree.push(' ');
                }
                self.entree.push_str(to_insert);
            }
            InsertKind::Op => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                if !self.entree.is_empty() {
                    self.entree.push(' ');
                }
                self.entree.push_str(to_insert);
                self.entree.push(' ');
            }
            InsertKind::Digit => {
                // chiffres: pas d’espaces auto
                self.entree.push_str(to_insert);
            }
        }

        self.focus_entree = true;
    }

    /// Évalue l’entrée via le noyau, puis dépose résultat/ΣLocal/Démarche dans l’état UI.
    fn eval_via_noyau(&mut self) {
        let s = self.entree.trim();
        if s.is_empty() {
            self.set_erreur("Entrée vide");
            self.focus_entree = true;
            return;
        }

        match self.evaluateur.evaluer_avec_demarche(s) {
            Ok((valeur, demarche)) => {
                let lecture = lecture_tronquee(valeur, self.digits);
                self.set_resultats(valeur.to_string(), lecture, demarche);
                self.focus_entree = true;
            }
            Err(e) => {
                log::debug!("formule refusée : {e}");
                self.set_erreur(e.to_string());
                self.focus_entree = true;
            }
        }
    }
}

/// Position du '$' si l’entrée se termine par une référence $nom.
fn fin_variable(entree: &str) -> Option<usize> {
    let debut = entree.rfind('$')?;
    let nom = &entree[debut + 1..];
    nom.chars()
        .all(|c| c.is_alphanumeric() || c == '_')
        .then_some(debut)
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InsertKind {
    Digit,
    Signe,
    Variable,
    Op,
    OpenParen,
    CloseParen,
}
