use crate::errors::PheError;
use crate::phe::{Ciphertext, PublicKey, SchemaType, SecretKey, mismatch};
use crate::spi::{self, Decryptor as _, Encryptor as _, Evaluator as _, Plaintext};
use crate::{elgamal, ou, paillier};

#[derive(Debug, Clone)]
pub enum Encryptor {
    Paillier(paillier::Encryptor),
    Ou(ou::Encryptor),
    ElGamal(elgamal::Encryptor),
}

impl Encryptor {
    pub fn new(pk: &PublicKey) -> Self {
        match pk {
            PublicKey::Paillier(pk) => Encryptor::Paillier(paillier::Encryptor::new(pk.clone())),
            PublicKey::Ou(pk) => Encryptor::Ou(ou::Encryptor::new(pk.clone())),
            PublicKey::ElGamal(pk) => Encryptor::ElGamal(elgamal::Encryptor::new(pk.clone())),
        }
    }

    pub fn schema(&self) -> SchemaType {
        match self {
            Encryptor::Paillier(_) => SchemaType::Paillier,
            Encryptor::Ou(_) => SchemaType::Ou,
            Encryptor::ElGamal(_) => SchemaType::ElGamal,
        }
    }
}

impl spi::Encryptor for Encryptor {
    type Ciphertext = Ciphertext;

    fn encrypt_zero(&self) -> Result<Ciphertext, PheError> {
        match self {
            Encryptor::Paillier(e) => e.encrypt_zero().map(Ciphertext::Paillier),
            Encryptor::Ou(e) => e.encrypt_zero().map(Ciphertext::Ou),
            Encryptor::ElGamal(e) => e.encrypt_zero().map(Ciphertext::ElGamal),
        }
    }

    fn encrypt(&self, plaintext: &Plaintext) -> Result<Ciphertext, PheError> {
        match self {
            Encryptor::Paillier(e) => e.encrypt(plaintext).map(Ciphertext::Paillier),
            Encryptor::Ou(e) => e.encrypt(plaintext).map(Ciphertext::Ou),
            Encryptor::ElGamal(e) => e.encrypt(plaintext).map(Ciphertext::ElGamal),
        }
    }

    fn encrypt_with_audit(&self, plaintext: &Plaintext) -> Result<(Ciphertext, String), PheError> {
        match self {
            Encryptor::Paillier(e) => e
                .encrypt_with_audit(plaintext)
                .map(|(ct, audit)| (Ciphertext::Paillier(ct), audit)),
            Encryptor::Ou(e) => e
                .encrypt_with_audit(plaintext)
                .map(|(ct, audit)| (Ciphertext::Ou(ct), audit)),
            Encryptor::ElGamal(e) => e
                .encrypt_with_audit(plaintext)
                .map(|(ct, audit)| (Ciphertext::ElGamal(ct), audit)),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Decryptor {
    Paillier(paillier::Decryptor),
    Ou(ou::Decryptor),
    ElGamal(elgamal::Decryptor),
}

impl Decryptor {
    pub fn new(sk: SecretKey) -> Self {
        match sk {
            SecretKey::Paillier(sk) => Decryptor::Paillier(paillier::Decryptor::new(sk)),
            SecretKey::Ou(sk) => Decryptor::Ou(ou::Decryptor::new(sk)),
            SecretKey::ElGamal(sk) => Decryptor::ElGamal(elgamal::Decryptor::new(sk)),
        }
    }

    pub fn schema(&self) -> SchemaType {
        match self {
            Decryptor::Paillier(_) => SchemaType::Paillier,
            Decryptor::Ou(_) => SchemaType::Ou,
            Decryptor::ElGamal(_) => SchemaType::ElGamal,
        }
    }

    /// A copy of the key this decryptor owns.
    pub fn secret_key(&self) -> SecretKey {
        match self {
            Decryptor::Paillier(d) => SecretKey::Paillier(d.secret_key().clone()),
            Decryptor::Ou(d) => SecretKey::Ou(d.secret_key().clone()),
            Decryptor::ElGamal(d) => SecretKey::ElGamal(d.secret_key().clone()),
        }
    }
}

impl spi::Decryptor for Decryptor {
    type Ciphertext = Ciphertext;

    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Plaintext, PheError> {
        match (self, ciphertext) {
            (Decryptor::Paillier(d), Ciphertext::Paillier(ct)) => d.decrypt(ct),
            (Decryptor::Ou(d), Ciphertext::Ou(ct)) => d.decrypt(ct),
            (Decryptor::ElGamal(d), Ciphertext::ElGamal(ct)) => d.decrypt(ct),
            _ => Err(mismatch(self.schema(), ciphertext.schema())),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Evaluator {
    Paillier(paillier::Evaluator),
    Ou(ou::Evaluator),
    ElGamal(elgamal::Evaluator),
}

impl Evaluator {
    pub fn new(pk: &PublicKey) -> Self {
        match pk {
            PublicKey::Paillier(pk) => Evaluator::Paillier(paillier::Evaluator::new(pk.clone())),
            PublicKey::Ou(pk) => Evaluator::Ou(ou::Evaluator::new(pk.clone())),
            PublicKey::ElGamal(pk) => Evaluator::ElGamal(elgamal::Evaluator::new(pk.clone())),
        }
    }

    pub fn schema(&self) -> SchemaType {
        match self {
            Evaluator::Paillier(_) => SchemaType::Paillier,
            Evaluator::Ou(_) => SchemaType::Ou,
            Evaluator::ElGamal(_) => SchemaType::ElGamal,
        }
    }

    fn first_mismatch(&self, operands: &[&Ciphertext]) -> PheError {
        let schema = self.schema();
        let got = operands
            .iter()
            .map(|ct| ct.schema())
            .find(|s| *s != schema)
            .unwrap_or(schema);
        mismatch(schema, got)
    }
}

impl spi::Evaluator for Evaluator {
    type Ciphertext = Ciphertext;

    fn add(&self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext, PheError> {
        match (self, a, b) {
            (Evaluator::Paillier(ev), Ciphertext::Paillier(a), Ciphertext::Paillier(b)) => {
                ev.add(a, b).map(Ciphertext::Paillier)
            }
            (Evaluator::Ou(ev), Ciphertext::Ou(a), Ciphertext::Ou(b)) => {
                ev.add(a, b).map(Ciphertext::Ou)
            }
            (Evaluator::ElGamal(ev), Ciphertext::ElGamal(a), Ciphertext::ElGamal(b)) => {
                ev.add(a, b).map(Ciphertext::ElGamal)
            }
            _ => Err(self.first_mismatch(&[a, b])),
        }
    }

    fn add_plain(&self, a: &Ciphertext, p: &Plaintext) -> Result<Ciphertext, PheError> {
        match (self, a) {
            (Evaluator::Paillier(ev), Ciphertext::Paillier(a)) => {
                ev.add_plain(a, p).map(Ciphertext::Paillier)
            }
            (Evaluator::Ou(ev), Ciphertext::Ou(a)) => ev.add_plain(a, p).map(Ciphertext::Ou),
            (Evaluator::ElGamal(ev), Ciphertext::ElGamal(a)) => {
                ev.add_plain(a, p).map(Ciphertext::ElGamal)
            }
            _ => Err(self.first_mismatch(&[a])),
        }
    }

    fn sub(&self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext, PheError> {
        match (self, a, b) {
            (Evaluator::Paillier(ev), Ciphertext::Paillier(a), Ciphertext::Paillier(b)) => {
                ev.sub(a, b).map(Ciphertext::Paillier)
            }
            (Evaluator::Ou(ev), Ciphertext::Ou(a), Ciphertext::Ou(b)) => {
                ev.sub(a, b).map(Ciphertext::Ou)
            }
            (Evaluator::ElGamal(ev), Ciphertext::ElGamal(a), Ciphertext::ElGamal(b)) => {
                ev.sub(a, b).map(Ciphertext::ElGamal)
            }
            _ => Err(self.first_mismatch(&[a, b])),
        }
    }

    fn negate(&self, a: &Ciphertext) -> Result<Ciphertext, PheError> {
        match (self, a) {
            (Evaluator::Paillier(ev), Ciphertext::Paillier(a)) => {
                ev.negate(a).map(Ciphertext::Paillier)
            }
            (Evaluator::Ou(ev), Ciphertext::Ou(a)) => ev.negate(a).map(Ciphertext::Ou),
            (Evaluator::ElGamal(ev), Ciphertext::ElGamal(a)) => {
                ev.negate(a).map(Ciphertext::ElGamal)
            }
            _ => Err(self.first_mismatch(&[a])),
        }
    }

    fn mul(&self, a: &Ciphertext, p: &Plaintext) -> Result<Ciphertext, PheError> {
        match (self, a) {
            (Evaluator::Paillier(ev), Ciphertext::Paillier(a)) => {
                ev.mul(a, p).map(Ciphertext::Paillier)
            }
            (Evaluator::Ou(ev), Ciphertext::Ou(a)) => ev.mul(a, p).map(Ciphertext::Ou),
            (Evaluator::ElGamal(ev), Ciphertext::ElGamal(a)) => {
                ev.mul(a, p).map(Ciphertext::ElGamal)
            }
            _ => Err(self.first_mismatch(&[a])),
        }
    }

    fn randomize(&self, a: &Ciphertext) -> Result<Ciphertext, PheError> {
        match (self, a) {
            (Evaluator::Paillier(ev), Ciphertext::Paillier(a)) => {
                ev.randomize(a).map(Ciphertext::Paillier)
            }
            (Evaluator::Ou(ev), Ciphertext::Ou(a)) => ev.randomize(a).map(Ciphertext::Ou),
            (Evaluator::ElGamal(ev), Ciphertext::ElGamal(a)) => {
                ev.randomize(a).map(Ciphertext::ElGamal)
            }
            _ => Err(self.first_mismatch(&[a])),
        }
    }
}
