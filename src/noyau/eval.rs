//! Noyau: évaluation (pipeline réel)
//!
//! jetons -> substitution ($nom) -> classification -> shunting-yard (pile postfixe)
//!        -> résolution depuis le sommet
//!
//! Résolution : on dépile le sommet. Un opérateur dépile lui-même ses opérandes
//! (DROITE d’abord, puis GAUCHE : la pile a été construite dans l’ordre postfixe),
//! chaque opérande étant à son tour résolu s’il s’agit d’un opérateur.
//! Pas d’arbre explicite : la pile postfixe EST l’arbre, lu à l’envers.
//!
//! Les opérateurs en cours de résolution attendent sur une pile de travail
//! (pas sur la pile d’appels) : la longueur d’une chaîne `1 + 1 + … + 1` n’est
//! bornée que par la mémoire.

use super::erreur::{ErreurFormule, Resultat};
use super::expr::{classer, Operateur};
use super::jetons::{format_jetons, Jetons};
use super::pile::Pile;
use super::rpn::{format_postfixe, vers_postfixe, Terme};
use super::variables::Registre;

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub postfixe: String,
}

/// Évaluateur avec son registre de variables (seul état persistant).
#[derive(Clone, Debug)]
pub struct Evaluateur {
    registre: Registre,
    /// None : pas de limite (défaut).
    profondeur_max: Option<usize>,
}

impl Default for Evaluateur {
    fn default() -> Self {
        Self {
            registre: Registre::new(),
            profondeur_max: None,
        }
    }
}

impl Evaluateur {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse les formules dont plus de `profondeur_max` opérateurs attendent
    /// leurs opérandes en même temps (`ImbricationExcessive`).
    pub fn avec_profondeur_max(mut self, profondeur_max: usize) -> Self {
        self.profondeur_max = Some(profondeur_max);
        self
    }

    pub fn enregistrer_variable(&mut self, nom: impl Into<String>, valeur: f64) {
        self.registre.enregistrer(nom, valeur);
    }

    pub fn registre(&self) -> &Registre {
        &self.registre
    }

    pub fn registre_mut(&mut self) -> &mut Registre {
        &mut self.registre
    }

    /// API publique : formule -> valeur.
    pub fn evaluer(&self, formule: &str) -> Resultat<f64> {
        let pile = self.analyser(formule)?;
        self.executer(pile)
    }

    /// Comme `evaluer`, avec la démarche (jetons bruts + postfixe) pour l’affichage.
    pub fn evaluer_avec_demarche(&self, formule: &str) -> Resultat<(f64, DemarcheNoyau)> {
        let jetons = format_jetons(Jetons::new(formule));
        let pile = self.analyser(formule)?;
        let postfixe = format_postfixe(&pile);
        let valeur = self.executer(pile)?;
        Ok((valeur, DemarcheNoyau { jetons, postfixe }))
    }

    /// Formule -> pile postfixe (sommet = dernier terme logique).
    pub fn analyser(&self, formule: &str) -> Resultat<Pile<Terme>> {
        let expressions = Jetons::new(formule)
            .map(|j| classer(self.registre.substituer(j)))
            .collect::<Resultat<Vec<_>>>()?;

        let pile = vers_postfixe(expressions)?;
        log::debug!("{formule:?} => postfixe [{}]", format_postfixe(&pile));
        Ok(pile)
    }

    /// Réduit une pile postfixe à une seule valeur (la pile est consommée).
    pub fn executer(&self, mut pile: Pile<Terme>) -> Resultat<f64> {
        let valeur = resoudre(&mut pile, self.profondeur_max)?;

        if !pile.est_vide() {
            return Err(ErreurFormule::OperandesExcedentaires {
                restants: pile.len(),
            });
        }

        log::debug!("résultat = {valeur}");
        Ok(valeur)
    }
}

/// Opérateur dépilé qui attend ses opérandes : DROITE d’abord, puis GAUCHE.
struct EnCours {
    op: Operateur,
    droite: Option<f64>,
}

/// Résout le terme au sommet de la pile (et tout ce dont il dépend).
fn resoudre(pile: &mut Pile<Terme>, limite: Option<usize>) -> Resultat<f64> {
    let mut en_cours: Pile<EnCours> = Pile::new();

    loop {
        let mut valeur = match pile.depiler().ok_or(ErreurFormule::PileVide)? {
            Terme::Nombre(v) => v,
            Terme::Operateur(op) => {
                en_cours.empiler(EnCours { op, droite: None });
                if let Some(max) = limite {
                    if en_cours.len() > max {
                        return Err(ErreurFormule::ImbricationExcessive { limite: max });
                    }
                }
                continue;
            }
        };

        // la valeur remonte vers les opérateurs qui l’attendent
        loop {
            match en_cours.depiler() {
                None => return Ok(valeur),
                Some(EnCours { op, droite: None }) => {
                    en_cours.empiler(EnCours {
                        op,
                        droite: Some(valeur),
                    });
                    break;
                }
                Some(EnCours {
                    op,
                    droite: Some(droite),
                }) => valeur = op.appliquer(valeur, droite),
            }
        }
    }
}
