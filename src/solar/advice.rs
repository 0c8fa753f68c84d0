//! Pros and cons of each system topology, as shown to the homeowner.

use serde::Serialize;

use super::system::SystemMode;

/// One bullet: a short headline followed by its explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Point {
    pub headline: &'static str,
    pub detail: &'static str,
}

const fn point(headline: &'static str, detail: &'static str) -> Point {
    Point { headline, detail }
}

/// Advantages and drawbacks of a topology, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProsCons {
    pub pros: &'static [Point],
    pub cons: &'static [Point],
}

const ON_GRID: ProsCons = ProsCons {
    pros: &[
        point("Biaya Termurah", "Tidak perlu membeli baterai yang mahal."),
        point("ROI Tercepat", "Balik modal biasanya 5-7 tahun."),
        point("Bebas Perawatan", "Minim maintenance karena komponen sedikit."),
        point(
            "Ekspor Listrik",
            "Sisa energi bisa diekspor ke PLN (jika meteran EXIM).",
        ),
    ],
    cons: &[
        point(
            "Tidak Ada Cadangan",
            "Listrik ikut mati total saat PLN padam (Anti-Islanding).",
        ),
        point("Birokrasi", "Wajib mengurus izin meteran EXIM ke PLN."),
        point(
            "Ketergantungan",
            "Tidak bisa berfungsi di daerah tanpa jaringan PLN.",
        ),
    ],
};

const HYBRID: ProsCons = ProsCons {
    pros: &[
        point(
            "Fleksibilitas",
            "Menikmati penghematan tagihan sekaligus punya cadangan daya.",
        ),
        point(
            "Energy Security",
            "Lampu tetap nyala saat tetangga mati lampu.",
        ),
        point(
            "Optimalisasi",
            "Bisa menyimpan energi siang hari untuk dipakai malam hari.",
        ),
    ],
    cons: &[
        point(
            "Biaya Tinggi",
            "Komponen inverter hybrid dan baterai cukup mahal.",
        ),
        point(
            "Maintenance Baterai",
            "Baterai memiliki umur pakai (5-10 tahun) dan harus diganti.",
        ),
        point("Kompleksitas", "Instalasi lebih rumit dibanding On-Grid."),
    ],
};

const OFF_GRID: ProsCons = ProsCons {
    pros: &[
        point("100% Mandiri", "Tidak membayar tagihan listrik sama sekali."),
        point("Bebas Lokasi", "Bisa dipasang di gunung, pulau, atau hutan."),
        point(
            "Kemandirian",
            "Tidak terdampak kenaikan tarif dasar listrik (TDL).",
        ),
    ],
    cons: &[
        point(
            "Biaya Sangat Mahal",
            "Butuh kapasitas baterai sangat besar (autonomy days).",
        ),
        point(
            "Energi Terbuang",
            "Jika baterai penuh dan matahari terik, energi terbuang sia-sia.",
        ),
        point(
            "Risiko Blackout",
            "Jika mendung berhari-hari, listrik bisa habis total.",
        ),
    ],
};

/// Returns the fixed pros/cons table for `mode`.
pub fn select_pros_cons(mode: SystemMode) -> ProsCons {
    match mode {
        SystemMode::OnGrid => ON_GRID,
        SystemMode::Hybrid => HYBRID,
        SystemMode::OffGrid => OFF_GRID,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mode_has_content() {
        for mode in SystemMode::ALL {
            let pc = select_pros_cons(mode);
            assert!(!pc.pros.is_empty(), "{mode} has no pros");
            assert!(!pc.cons.is_empty(), "{mode} has no cons");
        }
    }

    #[test]
    fn on_grid_order_is_stable() {
        let pc = select_pros_cons(SystemMode::OnGrid);
        let heads: Vec<_> = pc.pros.iter().map(|p| p.headline).collect();
        assert_eq!(
            heads,
            ["Biaya Termurah", "ROI Tercepat", "Bebas Perawatan", "Ekspor Listrik"]
        );
        assert_eq!(pc.cons.len(), 3);
    }

    #[test]
    fn modes_differ() {
        assert_ne!(
            select_pros_cons(SystemMode::Hybrid),
            select_pros_cons(SystemMode::OffGrid)
        );
    }
}
