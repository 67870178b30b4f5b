//! Poly1305 one-time authenticator (RFC 8439)
//!
//! Pure limb arithmetic over 2^130 - 5; no table lookups and no data
//! dependent branches in the hot path. Blocks are folded into the
//! accumulator as they arrive, so long messages do not buffer.

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Poly1305 key size in bytes
pub const POLY1305_KEY_SIZE: usize = 32;
/// Poly1305 tag size in bytes
pub const POLY1305_TAG_SIZE: usize = 16;

/// Incremental Poly1305 authenticator
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Poly1305 {
    /// Accumulator, three 64-bit limbs
    h: [u64; 3],
    /// Clamped r, low two limbs populated
    r: [u64; 3],
    /// Final addend s
    s: [u64; 2],
    /// Partial block awaiting more input
    buf: [u8; 16],
    buf_len: usize,
}

/// Compute (h * r) mod (2^130 - 5)
fn mul_reduce(h: [u64; 3], r: [u64; 3]) -> [u64; 3] {
    let (h0, h1, h2) = (h[0] as u128, h[1] as u128, h[2] as u128);
    let (r0, r1, r2) = (r[0] as u128, r[1] as u128, r[2] as u128);

    // schoolbook multiply
    let mut t0 = h0 * r0;
    let mut t1 = h0 * r1 + h1 * r0;
    let mut t2 = h0 * r2 + h1 * r1 + h2 * r0;
    let mut t3 = h1 * r2 + h2 * r1;
    let mut t4 = h2 * r2;

    // propagate carries
    let c1 = (t0 >> 64) as u64;
    t0 &= 0xffff_ffff_ffff_ffff;
    t1 += c1 as u128;
    let c2 = (t1 >> 64) as u64;
    t1 &= 0xffff_ffff_ffff_ffff;
    t2 += c2 as u128;
    let c3 = (t2 >> 64) as u64;
    t2 &= 0xffff_ffff_ffff_ffff;
    t3 += c3 as u128;
    let c4 = (t3 >> 64) as u64;
    t3 &= 0xffff_ffff_ffff_ffff;
    t4 += c4 as u128;
    t4 &= 0xffff_ffff_ffff_ffff;

    // fold bits >= 2^130 back in via 2^130 = 5 (mod p)
    let high = (t2 >> 2)
        .wrapping_add(t3 << 62)
        .wrapping_add(t4 << 126);
    t2 &= 0x3;

    let mut m0 = t0.wrapping_add(high * 5);
    let mut m1 = t1;
    let mut m2 = t2;

    let f1 = (m0 >> 64) as u64;
    m0 &= 0xffff_ffff_ffff_ffff;
    m1 = m1.wrapping_add(f1 as u128);
    let f2 = (m1 >> 64) as u64;
    m1 &= 0xffff_ffff_ffff_ffff;
    m2 = m2.wrapping_add(f2 as u128);

    m2 &= 0x3fff_ffff_ffff_ffff;
    [m0 as u64, m1 as u64, m2 as u64]
}

impl Poly1305 {
    /// Create a new authenticator with a 32-byte one-time key
    pub fn new(key: &[u8; POLY1305_KEY_SIZE]) -> Self {
        let mut r_bytes = [0u8; 16];
        r_bytes.copy_from_slice(&key[..16]);
        // clamp r per RFC 8439
        r_bytes[3] &= 15;
        r_bytes[7] &= 15;
        r_bytes[11] &= 15;
        r_bytes[15] &= 15;
        r_bytes[4] &= 252;
        r_bytes[8] &= 252;
        r_bytes[12] &= 252;

        let r0 = u64::from_le_bytes([
            r_bytes[0], r_bytes[1], r_bytes[2], r_bytes[3], r_bytes[4], r_bytes[5], r_bytes[6],
            r_bytes[7],
        ]);
        let r1 = u64::from_le_bytes([
            r_bytes[8], r_bytes[9], r_bytes[10], r_bytes[11], r_bytes[12], r_bytes[13],
            r_bytes[14], r_bytes[15],
        ]);
        let s0 = u64::from_le_bytes([
            key[16], key[17], key[18], key[19], key[20], key[21], key[22], key[23],
        ]);
        let s1 = u64::from_le_bytes([
            key[24], key[25], key[26], key[27], key[28], key[29], key[30], key[31],
        ]);
        r_bytes.zeroize();

        Poly1305 {
            h: [0; 3],
            r: [r0, r1, 0],
            s: [s0, s1],
            buf: [0u8; 16],
            buf_len: 0,
        }
    }

    /// Fold one block into the accumulator. `len` is the number of message
    /// bytes in `block` (16 for full blocks, less for the final partial one).
    fn process_block(&mut self, block: &[u8; 16], len: usize) {
        let mut n0 = u64::from_le_bytes([
            block[0], block[1], block[2], block[3], block[4], block[5], block[6], block[7],
        ]);
        let mut n1 = u64::from_le_bytes([
            block[8], block[9], block[10], block[11], block[12], block[13], block[14], block[15],
        ]);
        let n2 = (len == 16) as u64;

        // set the padding bit above the last message byte
        if len < 16 {
            let bit = (len * 8) as u32;
            if bit < 64 {
                n0 |= 1u64 << bit;
            } else {
                n1 |= 1u64 << (bit - 64);
            }
        }

        // h += n
        let (h0, c0) = self.h[0].overflowing_add(n0);
        let (h1_tmp, c1a) = self.h[1].overflowing_add(n1);
        let (h1, c1b) = h1_tmp.overflowing_add(c0 as u64);
        let c1 = (c1a || c1b) as u64;
        let h2 = self.h[2].wrapping_add(n2).wrapping_add(c1);

        self.h = mul_reduce([h0, h1, h2], self.r);
    }

    /// Feed message bytes into the authenticator
    pub fn update(&mut self, mut data: &[u8]) {
        if self.buf_len > 0 {
            let take = usize::min(16 - self.buf_len, data.len());
            self.buf[self.buf_len..self.buf_len + take].copy_from_slice(&data[..take]);
            self.buf_len += take;
            data = &data[take..];
            if self.buf_len == 16 {
                let block = self.buf;
                self.process_block(&block, 16);
                self.buf_len = 0;
            }
        }

        while data.len() >= 16 {
            let mut block = [0u8; 16];
            block.copy_from_slice(&data[..16]);
            self.process_block(&block, 16);
            data = &data[16..];
        }

        if !data.is_empty() {
            self.buf[..data.len()].copy_from_slice(data);
            self.buf_len = data.len();
        }
    }

    /// Finalize and return the 16-byte tag
    pub fn finalize(mut self) -> [u8; POLY1305_TAG_SIZE] {
        if self.buf_len > 0 {
            let mut block = [0u8; 16];
            block[..self.buf_len].copy_from_slice(&self.buf[..self.buf_len]);
            let len = self.buf_len;
            self.process_block(&block, len);
            block.zeroize();
        }

        // final conditional reduction modulo p = 2^130 - 5
        const P0: u64 = 0xffff_ffff_ffff_fffb;
        const P1: u64 = 0xffff_ffff_ffff_ffff;
        const P2: u64 = 3;

        let mut h0 = self.h[0];
        let mut h1 = self.h[1];
        let h2 = self.h[2];

        let (h0_p, borrow0) = h0.overflowing_sub(P0);
        let (h1_p_tmp, b1a) = h1.overflowing_sub(P1);
        let (h1_p, b1b) = h1_p_tmp.overflowing_sub(borrow0 as u64);
        let borrow1 = b1a || b1b;
        let (_, borrow2) = h2.overflowing_sub(P2 + (borrow1 as u64));

        // keep h - p only when h >= p
        if !borrow2 {
            h0 = h0_p;
            h1 = h1_p;
        }

        // add s to the low 128 bits
        let (t0, carry0) = h0.overflowing_add(self.s[0]);
        let t1 = h1.wrapping_add(self.s[1]).wrapping_add(carry0 as u64);

        let mut tag = [0u8; POLY1305_TAG_SIZE];
        tag[..8].copy_from_slice(&t0.to_le_bytes());
        tag[8..].copy_from_slice(&t1.to_le_bytes());
        tag
    }

    /// Finalize and compare against an expected tag in constant time
    pub fn verify(self, expected: &[u8; POLY1305_TAG_SIZE]) -> bool {
        let tag = self.finalize();
        tag.ct_eq(expected).into()
    }
}
