//! Symbolic names for the enumerated fields of ELF headers.
//!
//! The tables are static and sorted by value so that [`lookup()`] can binary search them.

/// An enumerated header field whose raw values have symbolic names.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    /// `e_ident[EI_CLASS]`.
    Class,
    /// `e_ident[EI_DATA]`.
    Data,
    /// `e_ident[EI_OSABI]`.
    OsAbi,
    /// `e_type`.
    ElfType,
    /// `e_machine`.
    Machine,
    /// `p_type`.
    SegmentType,
    /// `p_flags`.
    SegmentFlags,
    /// `sh_type`.
    SectionType,
    /// A single bit of `sh_flags`.
    SectionFlags,
}

impl Field {
    /// Every [`Field`].
    pub const ALL: [Field; 9] = [
        Field::Class,
        Field::Data,
        Field::OsAbi,
        Field::ElfType,
        Field::Machine,
        Field::SegmentType,
        Field::SegmentFlags,
        Field::SectionType,
        Field::SectionFlags,
    ];

    /// Returns the name of the field as written in the ELF specification.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "ei_class",
            Self::Data => "ei_data",
            Self::OsAbi => "ei_osabi",
            Self::ElfType => "e_type",
            Self::Machine => "e_machine",
            Self::SegmentType => "p_type",
            Self::SegmentFlags => "p_flags",
            Self::SectionType => "sh_type",
            Self::SectionFlags => "sh_flags",
        }
    }

    /// Returns the value to name table of the field.
    fn table(&self) -> &'static [(u32, &'static str)] {
        match self {
            Self::Class => CLASS,
            Self::Data => DATA,
            Self::OsAbi => OS_ABI,
            Self::ElfType => ELF_TYPE,
            Self::Machine => MACHINE,
            Self::SegmentType => SEGMENT_TYPE,
            Self::SegmentFlags => SEGMENT_FLAGS,
            Self::SectionType => SECTION_TYPE,
            Self::SectionFlags => SECTION_FLAGS,
        }
    }
}

/// Returns the symbolic name of `value` in `field`, or [`None`] if it has none.
pub fn lookup(field: Field, value: u32) -> Option<&'static str> {
    let table = field.table();
    table
        .binary_search_by_key(&value, |&(key, _)| key)
        .ok()
        .map(|index| table[index].1)
}

/// Splits `flags` into the names of its named `sh_flags` bits, lowest bit first, and the bits
/// that have no name.
pub fn section_flag_names(flags: u32) -> (Vec<&'static str>, u32) {
    let mut unnamed = flags;
    let names = (0..u32::BITS)
        .map(|shift| 1u32 << shift)
        .filter(|bit| flags & bit != 0)
        .filter_map(|bit| {
            let name = lookup(Field::SectionFlags, bit)?;
            unnamed &= !bit;
            Some(name)
        })
        .collect();

    (names, unnamed)
}

/// Names for `ei_class`.
static CLASS: &[(u32, &str)] = &[
    (0, "NONE"),
    (1, "32 bit"),
    (2, "64 bit"),
];

/// Names for `ei_data`.
static DATA: &[(u32, &str)] = &[
    (0, "NONE"),
    (1, "2LSB"),
    (2, "2MSB"),
];

/// Names for `ei_osabi`.
static OS_ABI: &[(u32, &str)] = &[
    (0, "SYSV"),
    (1, "HPUX"),
    (2, "NETBSD"),
    (3, "LINUX"),
    (4, "HURD"),
    (5, "86OPEN"),
    (6, "SOLARIS"),
    (7, "AIX"),
    (8, "IRIX"),
    (9, "FREEBSD"),
    (10, "TRU64"),
    (11, "MODESTO"),
    (12, "OPENBSD"),
    (13, "OPENVMS"),
    (14, "NSK"),
    (15, "AROS"),
    (16, "FENIXIOS"),
    (17, "CLOUDABI"),
    (18, "ARM_AEABI"),
    (19, "ARM"),
    (255, "STANDALONE"),
];

/// Names for `e_type`.
static ELF_TYPE: &[(u32, &str)] = &[
    (0, "ET_NONE"),
    (1, "ET_REL"),
    (2, "ET_EXEC"),
    (3, "ET_DYN"),
    (4, "ET_CORE"),
    (0xFE00, "ET_LOOS"),
    (0xFEFF, "ET_HIOS"),
    (0xFF00, "ET_LOPROC"),
    (0xFFFF, "ET_HIPROC"),
];

/// Names for `e_machine`.
static MACHINE: &[(u32, &str)] = &[
    (0, "EM_NONE"),
    (1, "EM_M32"),
    (2, "EM_SPARC"),
    (3, "EM_386"),
    (4, "EM_68K"),
    (5, "EM_88K"),
    (6, "EM_IAMCU"),
    (7, "EM_860"),
    (8, "EM_MIPS"),
    (9, "EM_S370"),
    (10, "EM_MIPS_RS3_LE"),
    (11, "reserved"),
    (12, "reserved"),
    (13, "reserved"),
    (14, "reserved"),
    (15, "EM_PARISC"),
    (16, "reserved"),
    (17, "EM_VPP500"),
    (18, "EM_SPARC32PLUS"),
    (19, "EM_960"),
    (20, "EM_PPC"),
    (21, "EM_PPC64"),
    (22, "EM_S390"),
    (23, "EM_SPU"),
    (24, "reserved"),
    (25, "reserved"),
    (26, "reserved"),
    (27, "reserved"),
    (28, "reserved"),
    (29, "reserved"),
    (30, "reserved"),
    (31, "reserved"),
    (32, "reserved"),
    (33, "reserved"),
    (34, "reserved"),
    (35, "reserved"),
    (36, "EM_V800"),
    (37, "EM_FR20"),
    (38, "EM_RH32"),
    (39, "EM_RCE"),
    (40, "EM_ARM"),
    (41, "EM_ALPHA"),
    (42, "EM_SH"),
    (43, "EM_SPARCV9"),
    (44, "EM_TRICORE"),
    (45, "EM_ARC"),
    (46, "EM_H8_300"),
    (47, "EM_H8_300H"),
    (48, "EM_H8S"),
    (49, "EM_H8_500"),
    (50, "EM_IA_64"),
    (51, "EM_MIPS_X"),
    (52, "EM_COLDFIRE"),
    (53, "EM_68HC12"),
    (54, "EM_MMA"),
    (55, "EM_PCP"),
    (56, "EM_NCPU"),
    (57, "EM_NDR1"),
    (58, "EM_STARCORE"),
    (59, "EM_ME16"),
    (60, "EM_ST100"),
    (61, "EM_TINYJ"),
    (62, "EM_X86_64"),
    (63, "EM_PDSP"),
    (64, "EM_PDP10"),
    (65, "EM_PDP11"),
    (66, "EM_FX66"),
    (67, "EM_ST9PLUS"),
    (68, "EM_ST7"),
    (69, "EM_68HC16"),
    (70, "EM_68HC11"),
    (71, "EM_68HC08"),
    (72, "EM_68HC05"),
    (73, "EM_SVX"),
    (74, "EM_ST19"),
    (75, "EM_VAX"),
    (76, "EM_CRIS"),
    (77, "EM_JAVELIN"),
    (78, "EM_FIREPATH"),
    (79, "EM_ZSP"),
    (80, "EM_MMIX"),
    (81, "EM_HUANY"),
    (82, "EM_PRISM"),
    (83, "EM_AVR"),
    (84, "EM_FR30"),
    (85, "EM_D10V"),
    (86, "EM_D30V"),
    (87, "EM_V850"),
    (88, "EM_M32R"),
    (89, "EM_MN10300"),
    (90, "EM_MN10200"),
    (91, "EM_PJ"),
    (92, "EM_OPENRISC"),
    (93, "EM_ARC_COMPACT"),
    (94, "EM_XTENSA"),
    (95, "EM_VIDEOCORE"),
    (96, "EM_TMM_GPP"),
    (97, "EM_NS32K"),
    (98, "EM_TPC"),
    (99, "EM_SNP1K"),
    (100, "EM_ST200"),
    (101, "EM_IP2K"),
    (102, "EM_MAX"),
    (103, "EM_CR"),
    (104, "EM_F2MC16"),
    (105, "EM_MSP430"),
    (106, "EM_BLACKFIN"),
    (107, "EM_SE_C33"),
    (108, "EM_SEP"),
    (109, "EM_ARCA"),
    (110, "EM_UNICORE"),
    (111, "EM_EXCESS"),
    (112, "EM_DXP"),
    (113, "EM_ALTERA_NIOS2"),
    (114, "EM_CRX"),
    (115, "EM_XGATE"),
    (116, "EM_C166"),
    (117, "EM_M16C"),
    (118, "EM_DSPIC30F"),
    (119, "EM_CE"),
    (120, "EM_M32C"),
    (121, "reserved"),
    (122, "reserved"),
    (123, "reserved"),
    (124, "reserved"),
    (125, "reserved"),
    (126, "reserved"),
    (127, "reserved"),
    (128, "reserved"),
    (129, "reserved"),
    (130, "reserved"),
    (131, "EM_TSK3000"),
    (132, "EM_RS08"),
    (133, "EM_SHARC"),
    (134, "EM_ECOG2"),
    (135, "EM_SCORE7"),
    (136, "EM_DSP24"),
    (137, "EM_VIDEOCORE3"),
    (138, "EM_LATTICEMICO32"),
    (139, "EM_SE_C17"),
    (140, "EM_TI_C6000"),
    (141, "EM_TI_C2000"),
    (142, "EM_TI_C5500"),
    (143, "EM_TI_ARP32"),
    (144, "EM_TI_PRU"),
    (145, "reserved"),
    (160, "EM_MMDSP_PLUS"),
    (161, "EM_CYPRESS_M8C"),
    (162, "EM_R32C"),
    (163, "EM_TRIMEDIA"),
    (164, "EM_QDSP6"),
    (165, "EM_8051"),
    (166, "EM_STXP7X"),
    (167, "EM_NDS32"),
    (168, "EM_ECOG1"),
    (169, "EM_MAXQ30"),
    (170, "EM_XIMO16"),
    (171, "EM_MANIK"),
    (172, "EM_CRAYNV2"),
    (173, "EM_RX"),
    (174, "EM_METAG"),
    (175, "EM_MCST_ELBRUS"),
    (176, "EM_ECOG16"),
    (177, "EM_CR16"),
    (178, "EM_ETPU"),
    (179, "EM_SLE9X"),
    (180, "EM_L10M"),
    (181, "EM_K10M"),
    (182, "reserved"),
    (183, "EM_AARCH64"),
    (184, "reserved"),
    (185, "EM_AVR32"),
    (186, "EM_STM8"),
    (187, "EM_TILE64"),
    (188, "EM_TILEPRO"),
    (189, "EM_MICROBLAZE"),
    (190, "EM_CUDA"),
    (191, "EM_TILEGX"),
    (192, "EM_CLOUDSHIELD"),
    (193, "EM_COREA_1ST"),
    (194, "EM_COREA_2ND"),
    (195, "EM_ARC_COMPACT2"),
    (196, "EM_OPEN8"),
    (197, "EM_RL78"),
    (198, "EM_VIDEOCORE5"),
    (199, "EM_78KOR"),
    (200, "EM_56800EX"),
    (201, "EM_BA1"),
    (202, "EM_BA2"),
    (203, "EM_XCORE"),
    (204, "EM_MCHP_PIC"),
    (205, "EM_INTEL205"),
    (206, "EM_INTEL206"),
    (207, "EM_INTEL207"),
    (208, "EM_INTEL208"),
    (209, "EM_INTEL209"),
    (210, "EM_KM32"),
    (211, "EM_KMX32"),
    (212, "EM_KMX16"),
    (213, "EM_KMX8"),
    (214, "EM_KVARC"),
    (215, "EM_CDP"),
    (216, "EM_COGE"),
    (217, "EM_COOL"),
    (218, "EM_NORC"),
    (219, "EM_CSR_KALIMBA"),
    (220, "EM_Z80"),
    (221, "EM_VISIUM"),
    (222, "EM_FT32"),
    (223, "EM_MOXIE"),
    (224, "EM_AMDGPU"),
    (243, "EM_RISCV"),
];

/// Names for `p_type`.
static SEGMENT_TYPE: &[(u32, &str)] = &[
    (0x0000_0000, "PT_NULL"),
    (0x0000_0001, "PT_LOAD"),
    (0x0000_0002, "PT_DYNAMIC"),
    (0x0000_0003, "PT_INTERP"),
    (0x0000_0004, "PT_NOTE"),
    (0x0000_0005, "PT_SHLIB"),
    (0x0000_0006, "PT_PHDR"),
    (0x0000_0007, "PT_TLS"),
    (0x6474_E551, "PT_GNU_STACK"),
    (0x6474_E552, "PT_GNU_RELRO"),
    (0x6FFF_FFFA, "PT_LOSUNW"),
    (0x6FFF_FFFB, "PT_SUNWBSS"),
    (0x6FFF_FFFF, "PT_HISUNW"),
    (0x7000_0000, "PT_LOPROC"),
    (0x7FFF_FFFF, "PT_HIPROC"),
];

/// Names for `p_flags`.
static SEGMENT_FLAGS: &[(u32, &str)] = &[
    (0, "All access denied"),
    (1, "PF_X"),
    (2, "PF_W"),
    (3, "PF_W | PF_X"),
    (4, "PF_R"),
    (5, "PF_R | PF_X"),
    (6, "PF_R | PF_W"),
    (7, "PF_R | PF_W | PF_X"),
];

/// Names for `sh_type`.
static SECTION_TYPE: &[(u32, &str)] = &[
    (0x0000_0000, "SHT_NULL"),
    (0x0000_0001, "SHT_PROGBITS"),
    (0x0000_0002, "SHT_SYMTAB"),
    (0x0000_0003, "SHT_STRTAB"),
    (0x0000_0004, "SHT_RELA"),
    (0x0000_0005, "SHT_HASH"),
    (0x0000_0006, "SHT_DYNAMIC"),
    (0x0000_0007, "SHT_NOTE"),
    (0x0000_0008, "SHT_NOBITS"),
    (0x0000_0009, "SHT_REL"),
    (0x0000_000A, "SHT_SHLIB"),
    (0x0000_000B, "SHT_DYNSYM"),
    (0x6FFF_FFFD, "SHT_GNU_verdef"),
    (0x6FFF_FFFE, "SHT_GNU_verneed"),
    (0x6FFF_FFFF, "SHT_GNU_versym"),
    (0x7000_0000, "SHT_LOPROC"),
    (0x7FFF_FFFF, "SHT_HIPROC"),
    (0x8000_0000, "SHT_LOUSER"),
    (0xFFFF_FFFF, "SHT_HIUSER"),
];

/// Names for the individual bits of `sh_flags`.
static SECTION_FLAGS: &[(u32, &str)] = &[
    (0x0000_0001, "SHF_WRITE"),
    (0x0000_0002, "SHF_ALLOC"),
    (0x0000_0004, "SHF_EXECINSTR"),
    (0x0000_0010, "SHF_MERGE"),
    (0x0000_0020, "SHF_STRINGS"),
    (0x0000_0040, "SHF_INFO_LINK"),
    (0x0000_0080, "SHF_LINK_ORDER"),
    (0x0000_0100, "SHF_OS_NONCONFORMING"),
    (0x0000_0200, "SHF_GROUP"),
    (0x0000_0400, "SHF_TLS"),
    (0x0000_0800, "SHF_COMPRESSED"),
];
